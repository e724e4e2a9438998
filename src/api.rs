use crate::MatchSet;
use crate::command::{Command, WordCommand, command_list};
use crate::dictionary::Dictionary;
use crate::engine::{LeafQuery, Partition, decompose, parse_constraints, run_leaf_with_metrics};
use crate::error::{Error, Result};
use crate::query::{LeafEvaluator, parse_expression, split_nested};
use crate::text::normalize;
use crate::translate::{WordArgs, leaf_lines, wordplay};
use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Session tunables.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory holding `<name>.txt` dictionaries.
    pub dictionary_dir: PathBuf,
    /// Longest word (in letters) `/cal` will decompose.
    pub max_segment_len: usize,
    /// Highest tolerance `/wp` escalates to.
    pub max_wordplay_tolerance: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { dictionary_dir: PathBuf::from("."), max_segment_len: 20, max_wordplay_tolerance: 99 }
    }
}

/// One result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// A dictionary entry, by position.
    Word { position: usize, display: String },
    /// A decomposition produced by `/cal`.
    Partition(Partition),
}

/// Results of one command run; nested commands yield one block per word of
/// the inner query, labelled with that word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub source: Option<String>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default)]
pub struct Response {
    pub blocks: Vec<Block>,
    /// Extra lines for the reader (sample sizes, final tolerance, skipped words).
    pub notes: Vec<String>,
    pub elapsed: Duration,
}

impl Response {
    fn single(items: Vec<Item>) -> Self {
        Response { blocks: vec![Block { source: None, items }], ..Response::default() }
    }

    /// Number of items across all blocks.
    pub fn total(&self) -> usize {
        self.blocks.iter().map(|b| b.items.len()).sum()
    }

    /// Display spellings of every word item, in order.
    pub fn words(&self) -> Vec<&str> {
        self.items()
            .filter_map(|item| match item {
                Item::Word { display, .. } => Some(display.as_str()),
                Item::Partition(_) => None,
            })
            .collect()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.blocks.iter().flat_map(|b| b.items.iter())
    }
}

/// What a line of input did.
#[derive(Debug, Clone)]
pub enum Outcome {
    Results(Response),
    /// `/load` without a name.
    Dictionaries(Vec<String>),
    Loaded { name: String, words: usize },
    Commands(Vec<(&'static str, &'static str, &'static str)>),
    Exit,
    Empty,
}

/// A dictionary plus the state needed to answer queries against it.
pub struct Session {
    dictionary: Dictionary,
    options: Options,
    rng: StdRng,
}

impl Session {
    pub fn new(dictionary: Dictionary, options: Options) -> Self {
        Session { dictionary, options, rng: StdRng::from_entropy() }
    }

    /// Session with a fixed random stream.
    pub fn with_seed(dictionary: Dictionary, options: Options, seed: u64) -> Self {
        Session { dictionary, options, rng: StdRng::seed_from_u64(seed) }
    }

    /// Session over `<options.dictionary_dir>/<name>.txt`.
    pub fn open(options: Options, name: &str) -> Result<Self> {
        let dictionary = Dictionary::load(&options.dictionary_dir, name)?;
        Ok(Session::new(dictionary, options))
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run one input line.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let start = Instant::now();
        let outcome = match Command::parse(line) {
            Command::Empty => Outcome::Empty,
            Command::Exit => Outcome::Exit,
            Command::Commands => Outcome::Commands(command_list()),
            Command::Load(None) => Outcome::Dictionaries(Dictionary::available(&self.options.dictionary_dir)?),
            Command::Load(Some(name)) => {
                let words = self.switch_dictionary(&name)?;
                Outcome::Loaded { name, words }
            }
            command => {
                let mut response = self.respond(command, line)?;
                response.elapsed = start.elapsed();
                Outcome::Results(response)
            }
        };
        Ok(outcome)
    }

    /// Run a line that produces results.
    pub fn query(&mut self, line: &str) -> Result<Response> {
        let start = Instant::now();
        let mut response = self.respond(Command::parse(line), line)?;
        response.elapsed = start.elapsed();
        Ok(response)
    }

    /// Display spellings matched by a line.
    pub fn search(&mut self, line: &str) -> Result<Vec<String>> {
        Ok(self.query(line)?.words().into_iter().map(String::from).collect())
    }

    /// Load another dictionary and make it active. On error the current one
    /// stays in place.
    pub fn switch_dictionary(&mut self, name: &str) -> Result<usize> {
        let dictionary = Dictionary::load(&self.options.dictionary_dir, name)?;
        let words = dictionary.len();
        debug!(from = self.dictionary.name(), to = name, words, "dictionary switched");
        self.dictionary = dictionary;
        Ok(words)
    }

    fn respond(&mut self, command: Command, line: &str) -> Result<Response> {
        match command {
            Command::Empty => Ok(Response::single(Vec::new())),
            Command::Search(text) => {
                let set = self.run_line(&text)?;
                Ok(Response::single(self.word_items(&set)))
            }
            Command::Boolean(text) => {
                let expr = parse_expression(&text)?;
                let set = expr.evaluate(self)?;
                Ok(Response::single(self.word_items(&set)))
            }
            Command::Random { count, query } => self.random(count, &query),
            Command::Word { kind, arg } => self.word_command(kind, &arg),
            Command::Unknown(name) => Err(Error::UnknownCommand(name)),
            Command::Load(_) | Command::Commands | Command::Exit => Err(Error::NotAQuery(line.trim().to_string())),
        }
    }

    /// Compile and scan one leaf line.
    fn run_line(&self, line: &str) -> Result<MatchSet> {
        let query = LeafQuery::parse(line)?;
        let run = run_leaf_with_metrics(&self.dictionary, &query);
        let m = &run.metrics;
        debug!(
            line,
            scanned = m.scanned,
            constraint_rejects = m.constraint_rejects,
            matcher_runs = m.matcher_runs,
            matched = m.matched,
            elapsed_us = m.total.as_micros() as u64,
            "leaf search"
        );
        Ok(run.matches)
    }

    fn word_items(&self, set: &MatchSet) -> Vec<Item> {
        set.positions().map(|position| self.word_item(position)).collect()
    }

    fn word_item(&self, position: usize) -> Item {
        Item::Word { position, display: self.dictionary.entries()[position].display.clone() }
    }

    /// Membership of a response: word items by position, partition segments
    /// by spelling.
    fn members(&self, response: &Response) -> MatchSet {
        let mut set = MatchSet::empty(self.dictionary.len());
        for item in response.items() {
            match item {
                Item::Word { position, .. } => set.insert(*position),
                Item::Partition(segments) => {
                    for segment in segments {
                        if let Some(position) = self.dictionary.position(&normalize(&segment.display)) {
                            set.insert(position);
                        }
                    }
                }
            }
        }
        set
    }

    fn random(&mut self, count: usize, query: &str) -> Result<Response> {
        let inner = self.respond(Command::parse(query), query)?;
        let mut positions: Vec<usize> = self.members(&inner).positions().collect();
        let available = positions.len();
        positions.shuffle(&mut self.rng);
        positions.truncate(count);

        let mut response = Response::single(positions.into_iter().map(|p| self.word_item(p)).collect());
        response.notes.push(format!("showing {} of {available}", response.total()));
        Ok(response)
    }

    /// Words produced by an inner query, first occurrence order.
    fn resolve_words(&mut self, inner: &str) -> Result<Vec<String>> {
        let response = self.respond(Command::parse(inner), inner)?;
        let words = response
            .items()
            .flat_map(|item| match item {
                Item::Word { display, .. } => vec![display.clone()],
                Item::Partition(segments) => segments.iter().map(|s| s.display.clone()).collect(),
            })
            .unique()
            .collect();
        Ok(words)
    }

    fn word_command(&mut self, kind: WordCommand, arg: &str) -> Result<Response> {
        let Some(nested) = split_nested(arg)? else {
            let (items, notes) = self.word_block(kind, arg)?;
            let mut response = Response::single(items);
            response.notes = notes;
            return Ok(response);
        };

        let words = self.resolve_words(&nested.inner)?;
        if words.is_empty() {
            return Err(Error::EmptyNested);
        }
        debug!(command = kind.name(), inner = %nested.inner, words = words.len(), "nested query resolved");

        let mut response = Response::default();
        for word in words {
            let items = match self.word_block(kind, &nested.with_word(&word)) {
                Ok((items, notes)) => {
                    response.notes.extend(notes.into_iter().map(|note| format!("{word}: {note}")));
                    items
                }
                Err(err @ (Error::NoRhyme(_) | Error::WordTooLong { .. } | Error::MissingWord(_))) => {
                    warn!(%word, %err, "word skipped");
                    response.notes.push(format!("{word}: {err}"));
                    Vec::new()
                }
                Err(err) => return Err(err),
            };
            response.blocks.push(Block { source: Some(word), items });
        }
        Ok(response)
    }

    /// Items (and notes) of one word command on a plain argument.
    fn word_block(&mut self, kind: WordCommand, arg: &str) -> Result<(Vec<Item>, Vec<String>)> {
        let args = WordArgs::parse(arg)?;
        match kind {
            WordCommand::Calembour => Ok((self.calembour(&args)?, Vec::new())),
            WordCommand::Wordplay => self.wordplay(&args),
            _ => {
                let mut set = MatchSet::empty(self.dictionary.len());
                for line in leaf_lines(kind, &args)? {
                    set = set.union(&self.run_line(&line)?);
                }
                Ok((self.word_items(&set), Vec::new()))
            }
        }
    }

    fn calembour(&self, args: &WordArgs) -> Result<Vec<Item>> {
        let word = args.normalized();
        if word.is_empty() {
            return Err(Error::MissingWord(WordCommand::Calembour.name()));
        }
        let max = self.options.max_segment_len;
        if word.len() > max {
            return Err(Error::WordTooLong { word: args.word.clone(), len: word.len(), max });
        }
        let constraints = parse_constraints(&args.constraints)?;
        let partitions = decompose(&self.dictionary, &word, &constraints, args.tolerance_value());
        debug!(word = %word, partitions = partitions.len(), "decomposed");
        Ok(partitions.into_iter().map(Item::Partition).collect())
    }

    /// Raise the tolerance until something other than the word itself shows
    /// up, or the ceiling is reached.
    fn wordplay(&self, args: &WordArgs) -> Result<(Vec<Item>, Vec<String>)> {
        let word = args.normalized();
        if word.is_empty() {
            return Err(Error::MissingWord(WordCommand::Wordplay.name()));
        }
        let ceiling = self.options.max_wordplay_tolerance;
        let mut tolerance = args.wordplay_start();
        loop {
            let set = self.run_line(&wordplay(args, tolerance, args.is_total()))?;
            let only_itself = set.positions().all(|p| self.dictionary.entries()[p].normalized == word);
            if !only_itself || tolerance >= ceiling {
                return Ok((self.word_items(&set), vec![format!("tolerance {tolerance}")]));
            }
            tolerance += 1;
        }
    }
}

impl LeafEvaluator for Session {
    fn universe(&self) -> usize {
        self.dictionary.len()
    }

    fn evaluate_leaf(&mut self, leaf: &str) -> Result<MatchSet> {
        let response = self.respond(Command::parse(leaf), leaf)?;
        Ok(self.members(&response))
    }
}
