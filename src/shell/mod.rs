//! Interactive operator shell over a registry.
//!
//! Each line is one command; the session turns it into reply lines so the
//! readline loop stays a thin printer.

use crate::config::Config;
use crate::error::Error;
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::Registry;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self::Lines(vec![text.into()])
    }
}

/// Command interpreter bound to one registry.
pub struct Session<'a> {
    registry: &'a Registry,
    config_path: Option<PathBuf>,
    log: Logger,
}

impl<'a> Session<'a> {
    /// `config_path` is re-read by `reload`; `None` disables it.
    ///
    /// # Errors
    /// Never in practice: the shell's own module name is non-empty.
    pub fn new(registry: &'a Registry, config_path: Option<PathBuf>) -> Result<Self, Error> {
        Ok(Self {
            registry,
            config_path,
            log: registry.logger("shell")?,
        })
    }

    /// Runs one command line.
    #[must_use]
    pub fn handle(&self, line: &str) -> Reply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Reply::Lines(Vec::new());
        };
        self.log.debug(&format!("Executing: {command}"));

        match command {
            "quit" | "exit" | "q" => Reply::Quit,
            "help" | "?" => Reply::line(HELP),
            "get" => self.cmd_get(args),
            "set" => self.cmd_set(args, true),
            "set-one" => self.cmd_set(args, false),
            "acquire" => self.cmd_acquire(args),
            "log" => self.cmd_log(args),
            "modules" => self.cmd_modules(),
            "default" => Reply::line(format!(
                "default: {} (built-in fallback: {})",
                self.registry.default_level(),
                Level::DEFAULT
            )),
            "format" => self.cmd_format(line, args),
            "reload" => self.cmd_reload(),
            "reset" => {
                self.registry.reset();
                Reply::line("registry reset")
            }
            _ => {
                self.log.warning(&format!("Unknown command: {command}"));
                Reply::line(format!("unknown command '{command}', type 'help'"))
            }
        }
    }

    fn cmd_get(&self, args: &[&str]) -> Reply {
        let [module] = args else {
            return Reply::line("usage: get <module>");
        };
        Reply::line(format!("{module}: {}", self.registry.module_level(module)))
    }

    fn cmd_set(&self, args: &[&str], pattern: bool) -> Reply {
        let [target, level] = args else {
            return Reply::line(if pattern {
                "usage: set <regex> <level>"
            } else {
                "usage: set-one <module|all> <level>"
            });
        };

        let result = if pattern {
            self.registry.set_module_level(target, level)
        } else {
            self.registry.set_level(target, level)
        };

        match result {
            Ok(level) => Reply::line(format!("{target} -> {level}")),
            Err(e) => Reply::line(format!("error: {e}")),
        }
    }

    fn cmd_acquire(&self, args: &[&str]) -> Reply {
        let [module] = args else {
            return Reply::line("usage: acquire <module>");
        };
        match self.registry.logger(module) {
            Ok(logger) => Reply::line(format!("{module}: {}", logger.level())),
            Err(e) => Reply::line(format!("error: {e}")),
        }
    }

    fn cmd_log(&self, args: &[&str]) -> Reply {
        let [module, level, message @ ..] = args else {
            return Reply::line("usage: log <module> <level> <message>");
        };
        if message.is_empty() {
            return Reply::line("usage: log <module> <level> <message>");
        }
        let level: Level = match level.parse() {
            Ok(level) => level,
            Err(e) => return Reply::line(format!("error: {e}")),
        };
        match self.registry.logger(module) {
            Ok(logger) => {
                logger.log(level, &message.join(" "));
                Reply::Lines(Vec::new())
            }
            Err(e) => Reply::line(format!("error: {e}")),
        }
    }

    fn cmd_modules(&self) -> Reply {
        let modules = self.registry.snapshot();
        if modules.is_empty() {
            return Reply::line("no modules registered");
        }
        let width = modules.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        Reply::Lines(
            modules
                .iter()
                .map(|(name, level)| format!("{name:<width$}  {level}"))
                .collect(),
        )
    }

    fn cmd_format(&self, line: &str, args: &[&str]) -> Reply {
        if args.is_empty() {
            return Reply::line(self.registry.format());
        }
        // A format keeps its own spacing, so take the raw remainder of the line.
        let line = line.trim_start();
        let spec = line.strip_prefix("format").unwrap_or(line).trim_start();
        match self.registry.set_format(spec) {
            Ok(()) => Reply::line("format updated"),
            Err(e) => Reply::line(format!("error: {e}")),
        }
    }

    fn cmd_reload(&self) -> Reply {
        let Some(path) = &self.config_path else {
            return Reply::line("no config file to reload");
        };
        match Config::load_from(path).and_then(|config| self.registry.apply_config(&config)) {
            Ok(()) => Reply::line(format!("reloaded {}", path.display())),
            Err(e) => Reply::line(format!("error: {e}")),
        }
    }
}

const HELP: &str = "Commands:
  get <module>                   Effective level of a module
  set <regex> <level>            Set level on every registered module matching regex
  set-one <module|all> <level>   Set level on one module (need not be registered) or all
  acquire <module>               Register a module as if a logger was requested
  log <module> <level> <msg>     Emit a message through a module's logger
  modules                        List registered modules and recorded levels
  default                        Show the default level
  format [spec]                  Show or replace the format specification
  reload                         Re-apply the config file
  reset                          Restore bootstrap defaults and forget all modules
  help, ?                        Show this help
  quit, exit, q                  Exit shell

Levels: debug, info, notice, warning, error, critical";

/// Runs the readline loop until `quit` or end of input.
///
/// # Errors
/// Returns error message if the line editor cannot be initialized.
pub fn run(registry: &Registry, config_path: Option<PathBuf>) -> Result<(), String> {
    let session = Session::new(registry, config_path).map_err(|e| e.to_string())?;
    let mut rl = DefaultEditor::new().map_err(|e| format!("Error creating editor: {e}"))?;

    let history_path = get_history_path();
    if let Some(path) = &history_path
        && rl.load_history(path).is_ok()
    {
        session.log.debug("History loaded");
    }

    println!("modlog shell - type 'help' for commands, 'quit' to exit");

    loop {
        match rl.readline("modlog> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                match session.handle(line) {
                    Reply::Quit => break,
                    Reply::Lines(lines) => {
                        for line in lines {
                            println!("{line}");
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                session.log.error(&format!("Readline error: {e}"));
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if rl.save_history(path).is_err() {
            session.log.warning("Could not save history");
        }
    }

    Ok(())
}

fn get_history_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "modlog")
        .map(|dirs| dirs.data_dir().join("shell_history"))
}
