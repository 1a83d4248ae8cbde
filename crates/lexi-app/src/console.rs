use std::fmt::Write as _;
use std::io::BufRead;
use std::sync::{Arc, Mutex};

use kanal::{AsyncReceiver, AsyncSender};
use lexi_types::{AppEvent, DictionaryId, SearchPhase, SessionSnapshot};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
  <word>            look up a word
  ?<prefix>         type without submitting (shows suggestions)
  :pick <n>         look up suggestion number n
  :dict <name>      use a dictionary (name or code, e.g. fr)
  :enable <name>    enable a dictionary
  :disable <name>   disable a dictionary
  :suggest on|off   toggle suggestions
  :help             this text
  :quit             exit";

#[derive(Debug, PartialEq)]
enum Command {
    Send(Vec<AppEvent>),
    Help,
    Invalid(String),
    Nothing,
}

fn parse_dictionary(name: &str) -> Result<DictionaryId, String> {
    name.parse::<DictionaryId>().map_err(|e| e.to_string())
}

fn parse_line(line: &str, suggestions: &[String]) -> Command {
    let line = line.trim();

    if line.is_empty() {
        return Command::Nothing;
    }

    if let Some(prefix) = line.strip_prefix('?') {
        return Command::Send(vec![AppEvent::QueryChanged(prefix.to_string())]);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Command::Send(vec![
            AppEvent::QueryChanged(line.to_string()),
            AppEvent::Submit,
        ]);
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let event = match name {
        "q" | "quit" => Ok(AppEvent::Close),
        "help" => return Command::Help,
        "pick" => arg
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| suggestions.get(i))
            .map(|word| AppEvent::SelectSuggestion(word.clone()))
            .ok_or_else(|| format!("no suggestion {arg:?}")),
        "dict" => parse_dictionary(arg).map(AppEvent::SelectDictionary),
        "enable" => parse_dictionary(arg).map(|id| AppEvent::SetDictionaryEnabled { id, enabled: true }),
        "disable" => {
            parse_dictionary(arg).map(|id| AppEvent::SetDictionaryEnabled { id, enabled: false })
        }
        "suggest" => match arg {
            "on" => Ok(AppEvent::SetSuggestionsEnabled(true)),
            "off" => Ok(AppEvent::SetSuggestionsEnabled(false)),
            _ => Err("expected :suggest on|off".to_string()),
        },
        _ => Err(format!("unknown command :{name}")),
    };

    match event {
        Ok(event) => Command::Send(vec![event]),
        Err(message) => Command::Invalid(message),
    }
}

/// Text shown for a snapshot. Empty when there is nothing to show.
fn render(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();

    match snapshot.phase {
        SearchPhase::Idle | SearchPhase::Suggesting => {
            for (i, word) in snapshot.suggestions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {word}", i + 1);
            }
        }
        SearchPhase::Loading => {
            let _ = writeln!(
                out,
                "Searching {} for \"{}\"...",
                snapshot.active_dictionary,
                snapshot.query.trim()
            );
            for (i, word) in snapshot.suggestions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {word}", i + 1);
            }
        }
        SearchPhase::Success => {
            let Some(result) = &snapshot.result else {
                return out;
            };

            match &result.phonetic {
                Some(phonetic) => {
                    let _ = writeln!(out, "{}  {phonetic}", result.word);
                }
                None => {
                    let _ = writeln!(out, "{}", result.word);
                }
            }

            if snapshot.details_visible {
                for meaning in &result.meanings {
                    if let Some(pos) = &meaning.part_of_speech {
                        let _ = writeln!(out, "  [{pos}]");
                    }
                    for (i, definition) in meaning.definitions.iter().enumerate() {
                        let _ = writeln!(out, "    {}. {}", i + 1, definition.text);
                        if let Some(example) = &definition.example {
                            let _ = writeln!(out, "       \"{example}\"");
                        }
                    }
                }
            }
        }
        SearchPhase::Error => {
            if let Some(error) = &snapshot.error {
                let _ = writeln!(out, "{}", error.message);
            }
        }
    }

    out
}

/// Line-oriented presentation on stdin/stdout
pub async fn console_loop(
    app_to_ui_rx: AsyncReceiver<SessionSnapshot>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let suggestions = Arc::new(Mutex::new(Vec::<String>::new()));

    // Renderer
    let renderer = {
        let suggestions = suggestions.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            let mut last = String::new();
            loop {
                let snapshot = tokio::select! {
                    _ = cancel.cancelled() => break,
                    snapshot = app_to_ui_rx.recv() => match snapshot {
                        Ok(snapshot) => snapshot,
                        Err(_) => break,
                    },
                };

                *suggestions.lock().unwrap_or_else(|e| e.into_inner()) =
                    snapshot.suggestions.clone();

                let text = render(&snapshot);
                if !text.is_empty() && text != last {
                    print!("{text}");
                }
                last = text;
            }
        })
    };

    if atty::is(atty::Stream::Stdin) {
        println!("Type a word to look it up, :help for commands.");
    }

    // Blocking stdin lives on its own thread so it never holds up runtime shutdown
    let (line_tx, line_rx) = kanal::bounded::<String>(16);
    let line_rx = line_rx.to_async();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = line_rx.recv() => line,
        };

        // Reader thread is gone: stdin reached EOF
        let Ok(line) = line else {
            ui_to_app_tx.send(AppEvent::Close).await?;
            break;
        };

        let current = suggestions.lock().unwrap_or_else(|e| e.into_inner()).clone();

        match parse_line(&line, &current) {
            Command::Send(events) => {
                let closing = events.iter().any(|e| matches!(e, AppEvent::Close));
                for event in events {
                    ui_to_app_tx.send(event).await?;
                }
                if closing {
                    break;
                }
            }
            Command::Help => println!("{HELP}"),
            Command::Invalid(message) => println!("{message}"),
            Command::Nothing => {}
        }
    }

    renderer.abort();
    Ok(())
}
