//! Interactive question loop

use std::future::Future;
use std::io;
use std::io::BufRead;
use std::io::Read;
use std::io::Write;
use std::process::ExitCode;

use async_trait::async_trait;
use tokio::io::AsyncBufRead;
use tokio::io::Lines;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::output::*;
use crate::config::AppConfig;
use crate::rag::QuestionAnswerer;
use crate::rag::SemanticSearch;

/// How the interactive loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatExit {
    /// The user typed an exit keyword
    Quit,
    /// Ctrl+C while reading or answering
    Interrupted,
    /// Input was closed
    EndOfInput,
}

/// Where the loop reads questions from, one line at a time
#[async_trait(?Send)]
pub trait LineSource {
    /// The next line without its terminator, or `None` at end of input
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

#[async_trait(?Send)]
impl<R: AsyncBufRead + Unpin> LineSource for Lines<R> {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Lines::next_line(self).await
    }
}

#[async_trait(?Send)]
impl LineSource for mpsc::Receiver<io::Result<String>> {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.recv().await.transpose()
    }
}

/// Read lines from `reader` on a dedicated thread
///
/// The thread is detached, so a read blocked on an idle terminal never holds
/// up shutdown. It stops after end of input, a read error, or once the
/// receiver is dropped.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::Receiver<io::Result<String>>
where
    R: Read + Send + 'static,
{
    let (tx, rx) = mpsc::channel(1);
    std::thread::spawn(move || {
        for line in io::BufReader::new(reader).lines() {
            let failed = line.is_err();
            if tx.blocking_send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Run the question/answer loop until the user leaves
///
/// Each turn prompts, reads one line and answers it. `interrupt` resolving at
/// any point ends the loop as [`ChatExit::Interrupted`].
pub async fn run_chat_loop<A, L, W, I>(
    answerer: &A,
    mut lines: L,
    out: &mut W,
    interrupt: I,
) -> io::Result<ChatExit>
where
    A: QuestionAnswerer + ?Sized,
    L: LineSource,
    W: Write,
    I: Future<Output = ()>,
{
    tokio::pin!(interrupt);

    loop {
        print_question_prompt(out)?;

        let line = tokio::select! {
            biased;
            () = &mut interrupt => {
                print_interrupted(out)?;
                return Ok(ChatExit::Interrupted);
            }
            line = lines.next_line() => line,
        };

        let question = match line {
            Ok(Some(line)) => line.trim().to_string(),
            Ok(None) => {
                print_farewell(out)?;
                return Ok(ChatExit::EndOfInput);
            }
            Err(e) => {
                print_unexpected_error(out, &e)?;
                continue;
            }
        };

        if is_exit_keyword(&question) {
            print_farewell(out)?;
            return Ok(ChatExit::Quit);
        }

        if question.is_empty() {
            print_empty_question(out)?;
            continue;
        }

        writeln!(out, "Processando...")?;
        out.flush()?;

        let answer = tokio::select! {
            biased;
            () = &mut interrupt => {
                print_interrupted(out)?;
                return Ok(ChatExit::Interrupted);
            }
            answer = answerer.ask(&question) => answer,
        };

        print_answer(out, &answer)?;
    }
}

/// Entry point of the interactive chat
///
/// Exits with status 1 when the API key is missing or the search system
/// cannot be initialized.
pub async fn handle_chat(config: &AppConfig) -> ExitCode {
    let mut stdout = io::stdout();

    // Console write failures leave nothing useful to report to
    let _ = print_banner(&mut stdout);

    if !config.has_api_key() {
        let _ = print_missing_api_key(&mut stdout);
        return ExitCode::FAILURE;
    }

    let _ = writeln!(stdout, "Inicializando sistema de busca...");
    let search = match SemanticSearch::from_config(config).await {
        Ok(search) => search,
        Err(e) => {
            tracing::error!("Search initialization failed: {}", e);
            let _ = print_init_failure(&mut stdout, &e);
            return ExitCode::FAILURE;
        }
    };
    let _ = writeln!(stdout, "Sistema inicializado com sucesso!\n");

    let interrupt = async {
        // If the handler cannot be installed, never report an interrupt
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let stdin = spawn_line_reader(io::stdin());
    match run_chat_loop(&search, stdin, &mut stdout, interrupt).await {
        Ok(exit) => {
            info!("Chat finished: {:?}", exit);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Console I/O failed: {}", e);
            ExitCode::SUCCESS
        }
    }
}
