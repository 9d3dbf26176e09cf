use std::env;
use std::path::Path;

use exec::ExecContext;
use itertools::Itertools;
use ival::Engine;

mod exec;
mod logger;
mod repl;

fn main() -> std::io::Result<()> {
    logger::init();

    let args = env::args().collect_vec();
    let mut engine = Engine::new();
    if let Some(file) = args.get(1) {
        exec::exec_file(Path::new(file), &mut ExecContext::default(), &mut engine)
    } else {
        repl::repl(&mut engine);
        Ok(())
    }
}
