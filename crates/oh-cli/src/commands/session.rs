use std::io::{self, BufRead, Write};

use colored::Colorize;
use oh_core::{Card, DrawMode};
use tracing::debug;

use super::{Coordinator, DrawOptions};

const HELP: &str = "\
Commands:
  draw              Draw a card in the current mode
  mode <classic|ai> Switch the draw mode
  card              Show the current card again
  help              Show this help
  quit              Leave the session";

/// Presentation state: the mode and the one card currently shown.
struct Shell {
    coordinator: Coordinator,
    mode: DrawMode,
    current: Option<Card>,
    done: bool,
}

impl Shell {
    async fn process(&mut self, input: &str, opts: &DrawOptions) -> Result<String, String> {
        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "draw" | "d" => self.do_draw(opts).await,
            "mode" => self.do_mode(rest),
            "card" => Ok(self
                .current
                .as_ref()
                .map(super::render_card)
                .unwrap_or_else(|| "No card drawn yet. Type 'draw'.".to_string())),
            "help" => Ok(HELP.to_string()),
            "quit" | "q" => {
                self.done = true;
                Ok("Goodbye!".to_string())
            }
            other => Err(format!("unknown command: {other} (type 'help')")),
        }
    }

    async fn do_draw(&mut self, opts: &DrawOptions) -> Result<String, String> {
        if self.coordinator.is_loading() {
            return Err("a draw is already in progress".to_string());
        }
        let card = super::draw_card(&self.coordinator, self.mode, opts.config.ritual_delay)
            .await
            .ok_or("a draw is already in progress")?;
        let rendered = super::render_card(&card);
        self.current = Some(card);
        Ok(rendered)
    }

    fn do_mode(&mut self, rest: &str) -> Result<String, String> {
        if rest.is_empty() {
            return Ok(format!("Mode: {}", self.mode));
        }
        self.mode = rest.parse().map_err(|e: oh_core::CoreError| e.to_string())?;
        Ok(format!("Mode set to {}", self.mode))
    }
}

pub async fn run(opts: &DrawOptions, mode: DrawMode) -> Result<(), String> {
    let coordinator = super::build_coordinator(opts)?;
    let deck_size = coordinator.deck().len();
    let provider = coordinator.ai().provider().config();
    debug!(
        text_model = %provider.text_model,
        image_model = %provider.image_model,
        "session ready"
    );
    let mut shell = Shell {
        coordinator,
        mode,
        current: None,
        done: false,
    };

    println!("  {} OH Card Session", "Starting".bold());
    println!("  Mode: {mode} | Deck: {deck_size} cards");
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match shell.process(input, opts).await {
            Ok(output) => println!("{output}\n"),
            Err(e) => println!("{}\n", e.yellow()),
        }
        if shell.done {
            break;
        }
    }

    Ok(())
}
