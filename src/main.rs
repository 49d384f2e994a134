use std::io;

use anyhow::bail;
use clause::{Config, run_source};

const INPUT: &str = r#"
// the motivating example: clauses are tried top to bottom
fib : Int -> Int
fib(0) = 0;
fib(1) = 1;
fib(n) = fib(n - 1) + fib(n - 2);

main : () -> ()
main() = { let result = fib(7); print("7th Fibonacci number: ", result); }
"#;

fn main() -> anyhow::Result<()> {
    if let Err(diagnostics) = run_source(INPUT, &Config::default(), io::stdout()) {
        for diagnostic in &diagnostics {
            eprintln!("{diagnostic}");
        }
        bail!("program failed with {} error(s)", diagnostics.len());
    }

    Ok(())
}
