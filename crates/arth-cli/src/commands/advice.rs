//! Advisory commands (prompt preview, ask, chat)

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use arth_core::{aggregate, prompts, Advisor, ChatSession};

use super::LedgerSource;

/// Print the composed prompt without calling the provider
pub fn cmd_prompt(source: &LedgerSource, file: Option<&Path>, question: &str) -> Result<()> {
    let summary = aggregate(&source.load(file)?);
    let prompt = prompts::compose(question, Some(&summary))?;
    println!("{}", prompt);
    Ok(())
}

/// Ask one question against the current ledger
///
/// Failures are reported with their user-facing message and a non-zero exit.
pub async fn cmd_ask(
    advisor: &Advisor,
    source: &LedgerSource,
    file: Option<&Path>,
    question: &str,
) -> Result<()> {
    let summary = aggregate(&source.load(file)?);
    let reply = advisor.advise(Some(question), Some(summary)).await;

    if !reply.succeeded {
        if let Some(kind) = reply.failure_kind {
            warn!(kind = %kind, "Advisory question failed");
        }
        bail!("{}", reply.text);
    }

    println!("{}", reply.text);
    Ok(())
}

/// Interactive chat on stdin/stdout
pub async fn cmd_chat(advisor: &Advisor, source: &LedgerSource, file: Option<&Path>) -> Result<()> {
    let summary = aggregate(&source.load(file)?);
    let mut session = ChatSession::new(advisor.clone(), summary);

    println!("💬 Ask about your finances. Empty line or Ctrl-D to quit.");
    println!();

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_chat(&mut session, stdin, &mut stdout).await?;
    info!(
        messages = session.transcript().len(),
        "Chat session ended"
    );

    println!();
    println!("   {} message(s) this session.", session.transcript().len());
    Ok(())
}

/// Read questions line by line until an empty line or EOF
///
/// The next question is read only after the previous reply has been written.
pub async fn run_chat<R, W>(session: &mut ChatSession, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "you> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            break;
        }

        let reply = session.ask(question).await;
        if let Some(kind) = reply.failure_kind {
            warn!(kind = %kind, "Chat question failed");
        }
        let prefix = if reply.succeeded { "arth" } else { "error" };
        writeln!(out, "{}> {}", prefix, reply.text)?;
        writeln!(out)?;
    }

    Ok(())
}
