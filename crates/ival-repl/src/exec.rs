use std::fs;
use std::path::Path;

use itertools::Itertools;
use strum::IntoEnumIterator;

use ival::ast::Node;
use ival::eval::IntervalFn;
use ival::{Engine, Error};

use crate::logger;

#[derive(Default)]
pub struct ExecContext {
    pub is_repl: bool,
    pub debug_mode: bool,
    pub show_tree: bool,
}

/// Runs a whole file as one program. Functions and conditionals may span
/// lines, so the file is not split.
pub fn exec_file(
    path: &Path,
    exec_ctx: &mut ExecContext,
    engine: &mut Engine,
) -> std::io::Result<()> {
    let src = fs::read_to_string(path)?;
    exec_source(&src, exec_ctx, engine);
    Ok(())
}

pub enum ExecResult {
    Exit,
    Error,
}

pub fn exec_line(
    line: &str,
    exec_ctx: &mut ExecContext,
    engine: &mut Engine,
) -> Option<ExecResult> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(remainder) = line.strip_prefix(":") {
        let shutdown = eval_command(remainder, exec_ctx, engine);
        return if shutdown { Some(ExecResult::Exit) } else { None };
    }

    exec_source(line, exec_ctx, engine)
}

fn exec_source(src: &str, exec_ctx: &ExecContext, engine: &mut Engine) -> Option<ExecResult> {
    let parsed = match engine.parse(src) {
        Ok(node) => node,
        Err(error) => {
            report(&Error::Syntax(error));
            return Some(ExecResult::Error);
        }
    };

    if exec_ctx.show_tree || exec_ctx.debug_mode {
        println!("Parsed: {parsed}");
    }
    if exec_ctx.debug_mode {
        println!("AST: {parsed:?}");
        println!();
    }

    let evaluated = match engine.evaluate(&parsed) {
        Ok(node) => node,
        Err(error) => {
            report(&Error::Semantic(error));
            return Some(ExecResult::Error);
        }
    };

    match &evaluated {
        Node::Function(func) if exec_ctx.is_repl => {
            println!("Defined function {}", func.head.name());
        }
        _ => println!("{evaluated}"),
    }

    if exec_ctx.debug_mode {
        println!();
        println!("Evaluated AST: {evaluated:?}");
    }
    None
}

fn report(error: &Error) {
    println!("\x1b[31mError:\x1b[0m {error}");
}

fn eval_command(command: &str, exec_ctx: &mut ExecContext, engine: &mut Engine) -> bool {
    let Some(kind) = command.chars().next() else {
        return false;
    };
    let args = command[kind.len_utf8()..].split_whitespace().collect_vec();

    match kind {
        'q' => return true,
        'h' => {
            if args.is_empty() {
                print_help("", engine);
            }
            for arg in args {
                print_help(arg, engine);
            }
        }
        'l' => list_definitions(engine),
        'o' => list_operators(engine),
        's' => update_settings(&args, exec_ctx),
        'r' => reset_definitions(&args, engine),
        'e' => {
            if let Some(name) = args.first() {
                let path = Path::new(name);
                if let Err(err) = exec_file(path, exec_ctx, engine) {
                    println!("Cannot open {name}: {err}");
                }
            }
        }
        _ => println!("Unknown command type {kind}. Ignoring"),
    }

    false
}

fn reset_definitions(names: &[&str], engine: &mut Engine) {
    if names.is_empty() {
        engine.reset();
        return;
    }
    for name in names {
        if engine.forget(name).is_none() {
            println!("{name} is not defined");
        }
    }
}

fn list_definitions(engine: &Engine) {
    let (functions, values): (Vec<_>, Vec<_>) = engine
        .globals()
        .bindings()
        .sorted_by(|(a, _), (b, _)| a.name().cmp(b.name()))
        .partition(|(_, node)| matches!(node, Node::Function(_)));

    println!("\nVariables:");
    for (sym, node) in values {
        println!("   {: <6}=   {node}", sym.name());
    }

    println!("\nFunctions:");
    for (_, node) in functions {
        println!("   {node}");
    }
    for builtin in IntervalFn::iter() {
        println!(" \x1b[90mb\x1b[0m {}/{}", builtin.name(), builtin.arity());
    }
}

fn list_operators(engine: &Engine) {
    println!("\nOperators:");
    for op in engine.operators().iter().sorted_by_key(|op| (op.lbp, op.name.clone())) {
        let fixity = op.fixity().map_or("closer".to_owned(), |fixity| fixity.to_string());
        println!("   {: <8}{: <8}{}", op.name, fixity, op.lbp);
    }
}

fn update_settings(args: &[&str], exec_ctx: &mut ExecContext) {
    match args.first().copied() {
        Some("debug") => exec_ctx.debug_mode = true,
        Some("normal") => exec_ctx.debug_mode = false,
        Some("tree") => exec_ctx.show_tree = true,
        Some("plain") => exec_ctx.show_tree = false,
        _ => {
            println!("Unknown setting");
            return;
        }
    }
    logger::set_debug(exec_ctx.debug_mode);
}

fn print_help(arg: &str, engine: &Engine) {
    if arg.is_empty() {
        println!(
            "ival, arithmetic over closed real intervals

Type an expression and it will be evaluated. Intervals are written I{{lo,hi}},
or A{{lo, hi}} to bind them to A. Functions are declared with
fun name(params) is body end, and new operators with prefix name power
or infix name power.

Commands:
   :q             quit
   :h [name]      this help, or help on a function
   :l             list bindings and functions
   :o             list operators and their binding powers
   :s setting     debug | normal | tree | plain
   :r [names]     forget the given bindings, or everything
   :e file        run a file
Log output is controlled by the {} environment variable.",
            logger::ENV_VAR
        );
        return;
    }

    if let Some(node) = engine.lookup(arg) {
        println!("{arg} = {node}");
    } else if let Ok(builtin) = arg.parse::<IntervalFn>() {
        println!("{arg} is built in and takes {} argument(s)", builtin.arity());
    } else if let Some(op) = engine.operators().get(arg) {
        println!("{arg} is an operator with binding power {}", op.lbp);
    } else {
        println!("{arg} is not defined");
    }
}
