//! The interactive REPL, grounded on `original_source/src/shell/main.cpp`'s
//! `shell::REPL`: one `Interpreter` for the whole session, `quit_on_error
//! = false`, and each input line auto-terminated with `;` if the user
//! left it off. Per spec §6, the REPL has no persisted state across
//! lines beyond the interpreter object itself — each line is its own
//! freshly loaded program.

use std::rc::Rc;

use rill_interp::Interpreter;
use rill_lex::Lexer;
use rill_util::ErrorList;

use crate::driver::run_statements;
use crate::terminal::Terminal;

pub fn run(term: Rc<Terminal>) -> anyhow::Result<()> {
    let mut interp = Interpreter::new();

    term.print_welcome();

    loop {
        term.print_prompt();

        let Some(mut line) = term.accept_input()? else {
            return Ok(());
        };
        if !line.ends_with(';') {
            line.push(';');
        }

        let mut errors = ErrorList::new();
        let tokens = Lexer::new(&line).scan(&mut errors);
        if !errors.is_empty() {
            term.print_errors(errors.iter());
            continue;
        }

        let statements = rill_par::parse(&tokens, &mut errors);
        if !errors.is_empty() {
            term.print_errors(errors.iter());
            continue;
        }

        run_statements(&mut interp, term.clone(), statements, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_semicolon_is_idempotent() {
        let mut line = "print 1".to_string();
        if !line.ends_with(';') {
            line.push(';');
        }
        assert_eq!(line, "print 1;");

        let mut already = "print 1;".to_string();
        if !already.ends_with(';') {
            already.push(';');
        }
        assert_eq!(already, "print 1;");
    }
}
