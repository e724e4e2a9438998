use wordsieve::{Block, Error, Item, Outcome, Response, Segment};

mod style {
    const RESET: &str = "\x1b[0m";
    const DIM: &str = "\x1b[2m";
    const BOLD_CYAN: &str = "\x1b[1;36m";
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const RED: &str = "\x1b[31m";
    const CYAN: &str = "\x1b[36m";
    const GRAY: &str = "\x1b[90m";

    /// Terminal roles of the REPL output; plain text when disabled.
    #[derive(Clone, Copy)]
    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn wrap(self, code: &str, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{code}{}{RESET}", s.as_ref()) } else { s.as_ref().to_string() }
        }

        /// `━━━ title ━━━` section rule.
        pub fn section(self, title: &str) -> String {
            self.wrap(GRAY, format!("━━━ {title} ━━━"))
        }

        pub fn title(self, s: impl AsRef<str>) -> String {
            self.wrap(BOLD_CYAN, s)
        }

        pub fn word(self, s: impl AsRef<str>) -> String {
            self.wrap(GREEN, s)
        }

        pub fn name(self, s: impl AsRef<str>) -> String {
            self.wrap(CYAN, s)
        }

        pub fn warn(self, s: impl AsRef<str>) -> String {
            self.wrap(YELLOW, s)
        }

        pub fn error(self, s: impl AsRef<str>) -> String {
            self.wrap(RED, s)
        }

        pub fn dim(self, s: impl AsRef<str>) -> String {
            self.wrap(DIM, s)
        }
    }
}

use style::Palette;

pub fn print_banner(dictionary: &str, words: usize, color: bool) {
    let palette = Palette::new(color);
    println!("{}", palette.title(format!("wordsieve {}", env!("CARGO_PKG_VERSION"))));
    println!("{}", palette.dim(format!("dictionary '{dictionary}' ({words} words), /cmd lists commands, Ctrl-D exits")));
}

pub fn print_outcome(outcome: &Outcome, color: bool) {
    let palette = Palette::new(color);
    match outcome {
        Outcome::Results(response) => print_response(response, palette),
        Outcome::Dictionaries(names) if names.is_empty() => {
            println!("{}", palette.dim("  no .txt dictionaries found"));
        }
        Outcome::Dictionaries(names) => {
            println!("\n{}", palette.section("Dictionaries"));
            for name in names {
                println!("  {name}");
            }
        }
        Outcome::Loaded { name, words } => {
            println!("{} {words} words loaded from '{name}'", palette.word("[OK]"));
        }
        Outcome::Commands(list) => {
            println!("\n{}", palette.section("Commands"));
            for (long, short, usage) in list {
                println!("  {:<16}{:<6}{}", palette.name(long), palette.name(short), palette.dim(usage));
            }
        }
        Outcome::Exit | Outcome::Empty => {}
    }
}

pub fn print_error(err: &Error, color: bool) {
    eprintln!("{} {err}", Palette::new(color).error("[ERROR]"));
}

fn print_response(response: &Response, palette: Palette) {
    println!("\n{}", palette.section("Results"));
    for block in &response.blocks {
        print_block(block, palette);
    }
    for note in &response.notes {
        println!("{}", palette.warn(format!("  • {note}")));
    }
    println!("\n{} {}", palette.title(format!("Total: {}", response.total())), palette.dim(format!("({:.2?})", response.elapsed)));
}

fn print_block(block: &Block, palette: Palette) {
    if let Some(source) = &block.source {
        println!("{}", palette.title(format!("── {source} ──")));
    }
    if block.items.is_empty() {
        println!("{}", palette.dim("  no results"));
        return;
    }
    for item in &block.items {
        match item {
            Item::Word { display, .. } => println!("  {}", palette.word(display)),
            Item::Partition(segments) => {
                let parts: Vec<String> = segments.iter().map(|s| segment(s, palette)).collect();
                println!("  {}", parts.join(&palette.dim(" + ")));
            }
        }
    }
}

/// A partition piece, with its edit cost when it is not an exact spelling.
fn segment(segment: &Segment, palette: Palette) -> String {
    let word = palette.word(&segment.display);
    if segment.cost == 0 { word } else { format!("{word}{}", palette.warn(format!("(~{})", segment.cost))) }
}
