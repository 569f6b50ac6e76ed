//! Extended PL/0 command-line compiler.
//!
//! Usage:
//!   pl0c [OPTIONS] <source_file>

use std::io::{self, BufRead, IsTerminal, Write};
use std::process::ExitCode;

use pl0::{
    compile_with_trace, dump_code, dump_symbols, dump_tokens, optimize, Diagnostics,
    DiagnosticRenderer, ExecState, Lexer, SourceFile, Vm,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "\
USAGE:
    pl0c [OPTIONS] <source_file>

Compiles Extended PL/0 source files to p-code and executes them.
Supports arrays, for-loops, heap allocation, and nested procedures.

OPTIONS:
    -h, --help        Display this help message and exit
    -v, --version     Display version information and exit
    --tokens          Print the lexer token sequence
    --ast             Print the parser's production trace
    --sym             Print the symbol table
    --code            Print the generated p-code
    --all             Enable all dumps (tokens, ast, sym, code)
    --trace           Trace p-code execution step by step
    --no-run          Compile only, do not execute
    --no-color        Disable colored output
    -O, --optimize    Enable optimizations
    -d, --debug       Enter the interactive debugger

EXIT CODES:
    0  Success
    1  Compilation error
    2  Runtime error
    3  File not found
    4  Invalid arguments";

#[derive(Default)]
struct Options {
    input: Option<String>,
    tokens: bool,
    ast: bool,
    sym: bool,
    code: bool,
    trace: bool,
    no_run: bool,
    no_color: bool,
    optimize: bool,
    debug: bool,
    help: bool,
    version: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => opts.help = true,
            "-v" | "--version" => opts.version = true,
            "--tokens" => opts.tokens = true,
            "--ast" => opts.ast = true,
            "--sym" => opts.sym = true,
            "--code" => opts.code = true,
            "--all" => {
                opts.tokens = true;
                opts.ast = true;
                opts.sym = true;
                opts.code = true;
            }
            "--trace" => opts.trace = true,
            "--no-run" => opts.no_run = true,
            "--no-color" => opts.no_color = true,
            "-O" | "--optimize" => opts.optimize = true,
            "-d" | "--debug" => opts.debug = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {}", other));
            }
            file => {
                if opts.input.is_some() {
                    return Err("multiple input files specified".into());
                }
                opts.input = Some(file.to_string());
            }
        }
    }

    Ok(opts)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Use --help for usage information.");
            return ExitCode::from(4);
        }
    };

    if opts.help {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }
    if opts.version {
        println!("Extended PL/0 compiler version {VERSION}");
        return ExitCode::SUCCESS;
    }

    let Some(input) = opts.input.as_deref() else {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    };

    let source = match SourceFile::from_path(input) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("Error: file not found: {}", input);
            return ExitCode::from(3);
        }
    };

    let use_color = !opts.no_color && io::stdout().is_terminal();

    if opts.tokens {
        let mut diag = Diagnostics::new();
        let mut lexer = Lexer::new(source.source());
        let tokens = lexer.tokenize(&mut diag);
        print!("{}", dump_tokens(&tokens));
    }

    let compiled = compile_with_trace(&source, opts.ast);

    if opts.ast {
        println!("[Parser] Production Trace:");
        print!("{}", compiled.ast);
    }
    if opts.sym {
        print!("{}", dump_symbols(&compiled.symbols));
    }
    if opts.code {
        print!("{}", dump_code(&compiled.code));
    }

    // Render diagnostics to stderr in source order.
    let renderer = DiagnosticRenderer::new(&source).with_color(use_color);
    let mut stderr = io::stderr();
    let _ = renderer.render_all(compiled.diagnostics.records(), &mut stderr);

    let errors = compiled.diagnostics.error_count();
    let warnings = compiled.diagnostics.warning_count();
    if errors > 0 {
        eprintln!("Compilation failed (errors: {errors}, warnings: {warnings})");
        return ExitCode::from(1);
    }
    if warnings > 0 {
        eprintln!("Compilation successful (errors: 0, warnings: {warnings})");
    }

    if opts.no_run {
        return ExitCode::SUCCESS;
    }

    let code = if opts.optimize {
        optimize(compiled.code)
    } else {
        compiled.code
    };

    let mut vm = Vm::new(&code);
    vm.set_symbols(&compiled.symbols);
    vm.set_trace(opts.trace);

    if opts.debug {
        run_debugger(&mut vm);
    } else {
        vm.run();
    }

    if let Some(error) = vm.error() {
        eprintln!("Runtime Error: {}", error);
        return ExitCode::from(2);
    }

    ExitCode::SUCCESS
}

/// Interactive debug REPL.
///
/// Commands: `b <line>` set breakpoint, `r`/`c` continue, `s` step,
/// `n` next source line, `p <name>` print a variable, `q` quit.
fn run_debugger(vm: &mut Vm<'_>) {
    println!("Entering debug mode.");
    println!("Commands: b <line>, r/c (continue), s (step), n (next), p <name>, q (quit)");

    vm.set_debug_mode(true);
    vm.start();

    let stdin = io::stdin();
    loop {
        match vm.state() {
            ExecState::Halted | ExecState::Error => {
                println!("Program terminated.");
                return;
            }
            ExecState::WaitingInput => {
                print!("? ");
                let _ = io::stdout().flush();
                let mut line = String::new();
                if stdin.lock().read_line(&mut line).is_err() {
                    return;
                }
                let value = line.trim().parse().unwrap_or(0);
                vm.provide_input(value);
                continue;
            }
            _ => {}
        }

        let line_no = vm.current_line().unwrap_or(0);
        print!("(debug L{})> ", line_no);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("b") => match words.next().and_then(|w| w.parse().ok()) {
                Some(bp) => {
                    vm.set_breakpoint(bp);
                    println!("Breakpoint set at line {}", bp);
                }
                None => println!("Usage: b <line_number>"),
            },
            Some("r") | Some("c") => vm.resume(),
            Some("s") => vm.step(),
            Some("n") => vm.step_over(),
            Some("p") => match words.next() {
                Some(name) => match vm.get_value(name) {
                    Some(value) => println!("{} = {}", name, value),
                    None => println!("{} is not visible here", name),
                },
                None => println!("Usage: p <variable_name>"),
            },
            Some("q") => return,
            Some(_) => println!("Unknown command."),
            None => {}
        }
    }
}
