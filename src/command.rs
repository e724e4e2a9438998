//! Input line classification.
//!
//! Every line becomes one tagged [`Command`]. Boolean expressions are
//! recognized first, then `/name` commands (a leading `\` is accepted in place
//! of `/`), and anything else is a plain leaf search.

use crate::query::is_expression;

/// Commands that take a word (or a nested query) as their argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCommand {
    Calembour,
    Anagram,
    Paronomasia,
    Anasyllabic,
    Anaphora,
    Epiphora,
    Multisyllabic,
    Univocalism,
    Assonant,
    Consonant,
    Wordplay,
}

impl WordCommand {
    pub fn name(self) -> &'static str {
        match self {
            WordCommand::Calembour => "/calembour",
            WordCommand::Anagram => "/anagram",
            WordCommand::Paronomasia => "/paronomasia",
            WordCommand::Anasyllabic => "/anasyllabic",
            WordCommand::Anaphora => "/anaphora",
            WordCommand::Epiphora => "/epiphora",
            WordCommand::Multisyllabic => "/multisyllabic",
            WordCommand::Univocalism => "/univocalism",
            WordCommand::Assonant => "/assonant",
            WordCommand::Consonant => "/consonant",
            WordCommand::Wordplay => "/wordplay",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain leaf line.
    Search(String),
    /// Line with top-level boolean operators or a single group.
    Boolean(String),
    /// Draw `count` entries at random from the results of `query`.
    Random { count: usize, query: String },
    Word { kind: WordCommand, arg: String },
    /// List dictionaries, or switch to the named one.
    Load(Option<String>),
    Commands,
    Exit,
    Empty,
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Word(WordCommand),
    Random,
    Load,
    Commands,
    Exit,
}

/// `(long, short, description, kind)` for every command.
const COMMANDS: &[(&str, &str, &str, Kind)] = &[
    ("/random", "/rd", "[n] [QUERY]  n random results of a query", Kind::Random),
    ("/calembour", "/cal", "WORD [C] n  split a word into dictionary words", Kind::Word(WordCommand::Calembour)),
    ("/anagram", "/ang", "WORD [C] n  same letters in any order", Kind::Word(WordCommand::Anagram)),
    ("/paronomasia", "/par", "WORD [C] n  same consonants, any vowels", Kind::Word(WordCommand::Paronomasia)),
    ("/anasyllabic", "/ans", "WORD [C] n  syllables reordered", Kind::Word(WordCommand::Anasyllabic)),
    ("/anaphora", "/anp", "WORD [C] n  words starting with WORD", Kind::Word(WordCommand::Anaphora)),
    ("/epiphora", "/epi", "WORD [C] n  words ending with WORD", Kind::Word(WordCommand::Epiphora)),
    ("/multisyllabic", "/mul", "WORD [C] n  same vowels in order", Kind::Word(WordCommand::Multisyllabic)),
    ("/univocalism", "/uni", "WORD [C] n  only the first vowel of WORD", Kind::Word(WordCommand::Univocalism)),
    ("/assonant", "/aso", "WORD [C] n  assonant rhymes", Kind::Word(WordCommand::Assonant)),
    ("/consonant", "/con", "WORD [C] n  consonant rhymes", Kind::Word(WordCommand::Consonant)),
    ("/wordplay", "/wp", "WORD [C] n  nearest words by escalating tolerance", Kind::Word(WordCommand::Wordplay)),
    ("/load", "/ld", "[NAME]  list dictionaries or switch", Kind::Load),
    ("/commands", "/cmd", "list commands", Kind::Commands),
    ("/help", "/hp", "list commands", Kind::Commands),
    ("/exit", "/ex", "leave", Kind::Exit),
];

/// `(long name, short name, usage)` rows for help output.
pub fn command_list() -> Vec<(&'static str, &'static str, &'static str)> {
    COMMANDS.iter().map(|&(long, short, usage, _)| (long, short, usage)).collect()
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        if is_expression(line) {
            return Command::Boolean(line.to_string());
        }

        let line = match line.strip_prefix('\\') {
            Some(rest) => format!("/{rest}"),
            None => line.to_string(),
        };
        if !line.starts_with('/') {
            return Command::Search(line);
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line.as_str(), ""),
        };
        let name = name.to_lowercase();
        let Some(&(_, _, _, kind)) = COMMANDS.iter().find(|(long, short, _, _)| *long == name || *short == name) else {
            return Command::Unknown(name);
        };

        match kind {
            Kind::Word(kind) => Command::Word { kind, arg: arg.to_string() },
            Kind::Random => parse_random(arg),
            Kind::Load => Command::Load((!arg.is_empty()).then(|| arg.to_string())),
            Kind::Commands => Command::Commands,
            Kind::Exit => Command::Exit,
        }
    }
}

fn parse_random(arg: &str) -> Command {
    let (count, query) = match arg.split_once(char::is_whitespace) {
        Some((first, rest)) if first.bytes().all(|b| b.is_ascii_digit()) => (first.parse().ok(), rest.trim()),
        None if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) => (arg.parse().ok(), ""),
        _ => (Some(1), arg),
    };
    let query = if query.is_empty() {
        ".".to_string()
    } else if query.starts_with('[') {
        format!(". {query}")
    } else {
        query.to_string()
    };
    Command::Random { count: count.unwrap_or(1), query }
}
