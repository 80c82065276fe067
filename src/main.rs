use std::{
    env::args_os,
    fs,
    io::{self, stdin, IsTerminal},
    path::Path,
    process::ExitCode,
};

use pascalet::interpreter::Interpreter;
use rustyline::error::ReadlineError;
use rustyline::validate::MatchingBracketValidator;
use rustyline::Editor;
use rustyline::{Completer, Helper, Highlighter, Hinter, Validator};
use std::error::Error;

fn main() -> ExitCode {
    if args_os().len() > 2 {
        eprintln!("usage: pascalet [file]");
        return ExitCode::FAILURE;
    }

    if let Some(arg) = args_os().nth(1) {
        run_file(Path::new(&arg))
    } else {
        match run_prompt() {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        }
    }
}

fn run_file(path: &Path) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("error reading {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut interpreter = Interpreter::new();
    if let Err(err) = interpreter.run(content.as_str()) {
        println!("error: {}", err);
        return ExitCode::FAILURE;
    }

    print_snapshot(&interpreter)
}

fn print_snapshot(interpreter: &Interpreter) -> ExitCode {
    match serde_json::to_string_pretty(&interpreter.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[derive(Helper, Completer, Hinter, Highlighter, Validator)]
struct PromptHelper {
    #[rustyline(Completer)]
    completer: (),
    #[rustyline(Validator)]
    validator: MatchingBracketValidator,
}

fn run_prompt() -> Result<(), Box<dyn Error>> {
    let mut interpreter = Interpreter::new();
    if !stdin().is_terminal() {
        let program = io::read_to_string(stdin().lock())?;
        if let Err(err) = interpreter.run(program.as_str()) {
            println!("error: {}", err);
        } else {
            let _ = print_snapshot(&interpreter);
        }
        return Ok(());
    }

    let h = PromptHelper {
        completer: (),
        validator: MatchingBracketValidator::new(),
    };
    let mut rl = Editor::new()?;
    rl.set_helper(Some(h));

    loop {
        let readline = rl.readline("calc> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if line.trim().is_empty() {
                    continue;
                }
                match interpreter.eval_expression(&line) {
                    Ok(val) => println!("{val}"),
                    Err(err) => println!("error: {}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => {
                break Err(Box::new(err));
            }
        }
    }
}
