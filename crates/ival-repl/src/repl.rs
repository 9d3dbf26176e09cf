use itertools::Itertools;
use lazy_regex::regex_find;
use std::borrow::Cow::{self, Borrowed, Owned};
use strum::IntoEnumIterator;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter, MatchingBracketHighlighter};
use rustyline::validate::MatchingBracketValidator;
use rustyline::{Completer, Helper, Hinter, Validator};
use rustyline::{CompletionType, Config, Editor};

use ival::Engine;
use ival::eval::IntervalFn;

use crate::exec::{ExecContext, ExecResult, exec_line};

const HISTORY: &str = "ival_history.txt";

const KEYWORDS: [&str; 8] = ["fun", "is", "end", "if", "then", "else", "prefix", "infix"];

#[derive(Helper, Completer, Hinter, Validator)]
struct ReplHelper {
    #[rustyline(Completer)]
    completer: NameCompleter,
    highlighter: MatchingBracketHighlighter,
    #[rustyline(Validator)]
    validator: MatchingBracketValidator,
    colored_prompt: String,
}

struct NameCompleter;

impl Completer for NameCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let partial = if pos == line.len() { regex_find!(r"[a-z0-9]+$", line) } else { None };
        let Some(partial) = partial else {
            return Ok((0, Vec::with_capacity(0)));
        };

        let start = pos - partial.len();
        let builtins = IntervalFn::iter()
            .map(IntervalFn::name)
            .filter(|name| name.starts_with(partial))
            .map(|name| Pair {
                display: name.to_owned(),
                replacement: format!("{name}("),
            });
        let keywords = KEYWORDS
            .into_iter()
            .filter(|kw| kw.starts_with(partial))
            .map(|kw| Pair {
                display: kw.to_owned(),
                replacement: format!("{kw} "),
            });
        Ok((start, builtins.chain(keywords).collect_vec()))
    }
}

impl Highlighter for ReplHelper {
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Borrowed(&self.colored_prompt)
        } else {
            Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned("\x1b[1m".to_owned() + hint + "\x1b[m")
    }

    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

pub fn repl(engine: &mut Engine) {
    println!("\nStarting ival REPL... (:h for help)");

    let prompt = "ival> ";

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(true)
        .build();
    let helper = ReplHelper {
        completer: NameCompleter,
        highlighter: MatchingBracketHighlighter::new(),
        colored_prompt: format!("\x1b[1;36m{prompt}\x1b[0m"),
        validator: MatchingBracketValidator::new(),
    };

    let mut editor = match Editor::with_config(config) {
        Ok(editor) => editor,
        Err(err) => {
            log::error!("cannot start line editor: {err}");
            return;
        }
    };
    editor.set_helper(Some(helper));

    if editor.load_history(HISTORY).is_err() {
        println!("No history file found. Creating empty file \n");
    }

    let mut exec_ctx = ExecContext {
        is_repl: true,
        ..Default::default()
    };

    loop {
        println!();
        let line = match editor.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(err) => {
                println!("Encountered error while reading input: {err}");
                continue;
            }
        };

        if let Err(err) = editor.save_history(HISTORY) {
            log::warn!("cannot save history: {err}");
        }

        match exec_line(&line, &mut exec_ctx, engine) {
            Some(ExecResult::Exit) => {
                println!("Exiting...");
                break;
            }
            Some(ExecResult::Error) | None => (),
        }
    }
}
