use anyhow::{Context, Result};
use answer_search::{Answer, CorpusSource, QueryPipeline, SearchError};
use serde::Serialize;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Bot => "Bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

/// Conversation log owned by the front end
///
/// Turns are recorded in pairs: each user query is immediately followed by
/// the reply it produced.
#[derive(Debug, Default, Serialize)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, query: &str, reply: &str) {
        self.turns.push(ChatTurn {
            role: Role::User,
            text: query.to_string(),
        });
        self.turns.push(ChatTurn {
            role: Role::Bot,
            text: reply.to_string(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Line-oriented chat loop
///
/// Plain lines are queries. `/history` prints the session, `/load <path>`
/// switches the corpus file and `/quit` (or end of input) leaves.
pub fn run<R: BufRead, W: Write>(
    pipeline: &QueryPipeline,
    source: &mut CorpusSource,
    session: &mut ChatSession,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "Ask a question, /history, /load <path> or /quit.")?;
    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/history" => {
                for turn in session.turns() {
                    writeln!(output, "{}: {}", turn.role.label(), turn.text)?;
                }
                continue;
            }
            _ => {}
        }

        if let Some(path) = line
            .strip_prefix("/load")
            .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let path = path.trim();
            if path.is_empty() {
                writeln!(output, "Usage: /load <path>")?;
                continue;
            }
            source.set_path(path);
            match source.refresh(pipeline.normalizer()) {
                Ok(corpus) => writeln!(output, "Loaded {} sentences from {path}", corpus.len())?,
                Err(err) => writeln!(output, "{err}")?,
            }
            continue;
        }

        let answer = match pipeline.answer(line, source.refresh(pipeline.normalizer())) {
            Ok(answer) => answer,
            Err(SearchError::EmptyQuery) => continue,
            Err(err) => return Err(err.into()),
        };
        if let Some(corrected) = corrected_differs(&answer, line) {
            writeln!(output, "Corrected query: {corrected}")?;
        }
        let reply = answer.text();
        writeln!(output, "{reply}")?;
        session.record(line, &reply);
    }
    output.flush()?;
    Ok(())
}

fn corrected_differs<'a>(answer: &'a Answer, query: &str) -> Option<&'a str> {
    answer
        .corrected_query()
        .filter(|corrected| !corrected.eq_ignore_ascii_case(query))
}
