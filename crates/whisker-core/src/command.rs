use std::collections::HashMap;

use crate::bus::EventBus;
use crate::console::Console;
use crate::event::{ControlRequest, Event};

/// Output from a command execution.
#[derive(Debug)]
pub enum CommandOutput {
    /// Lines to display in the console.
    Lines(Vec<String>),
    /// Signal that the app should quit.
    Quit,
}

/// Context available to commands during execution.
pub struct CommandContext<'a> {
    pub console: &'a mut Console,
    /// Pet commands publish [`Event::Control`] here; the app applies them.
    pub bus: &'a mut EventBus,
}

/// A console command.
pub trait Command: Send + Sync {
    fn name(&self) -> &str;
    fn aliases(&self) -> &[&str] { &[] }
    fn description(&self) -> &str;
    fn usage(&self) -> &str { self.name() }
    fn execute(&self, args: &[&str], ctx: &mut CommandContext) -> CommandOutput;
}

/// Registry of console commands.
///
/// `help` (alias `?`) is answered by the registry itself since it needs the
/// full command list.
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
    lookup: HashMap<String, usize>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let idx = self.commands.len();
        self.lookup.insert(cmd.name().to_string(), idx);
        for alias in cmd.aliases() {
            self.lookup.insert(alias.to_string(), idx);
        }
        self.commands.push(cmd);
    }

    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandOutput {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            return CommandOutput::Lines(vec![]);
        };

        if name == "help" || name == "?" {
            return CommandOutput::Lines(self.help(args.first().copied()));
        }

        match self.lookup.get(name) {
            Some(&idx) => self.commands[idx].execute(args, ctx),
            None => CommandOutput::Lines(vec![format!(
                "unknown command: '{}'. Type 'help' for available commands.",
                name
            )]),
        }
    }

    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    fn help(&self, topic: Option<&str>) -> Vec<String> {
        match topic {
            Some(topic) => match self.lookup.get(topic) {
                Some(&idx) => {
                    let cmd = &self.commands[idx];
                    let mut lines = vec![
                        format!("usage: {}", cmd.usage()),
                        format!("  {}", cmd.description()),
                    ];
                    if !cmd.aliases().is_empty() {
                        lines.push(format!("  aliases: {}", cmd.aliases().join(", ")));
                    }
                    lines
                }
                None => vec![format!("no such command: '{}'", topic)],
            },
            None => {
                let mut lines = vec!["  help [command] — list commands or describe one".to_string()];
                lines.extend(
                    self.commands
                        .iter()
                        .map(|cmd| format!("  {} — {}", cmd.usage(), cmd.description())),
                );
                lines
            }
        }
    }
}

// ── Built-in commands ──

pub struct ClearCommand;

impl Command for ClearCommand {
    fn name(&self) -> &str { "clear" }
    fn aliases(&self) -> &[&str] { &["cls"] }
    fn description(&self) -> &str { "Clear console log" }

    fn execute(&self, _args: &[&str], ctx: &mut CommandContext) -> CommandOutput {
        ctx.console.clear_logs();
        CommandOutput::Lines(vec![])
    }
}

pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str { "quit" }
    fn aliases(&self) -> &[&str] { &["exit", "q"] }
    fn description(&self) -> &str { "Send the cat home" }

    fn execute(&self, _args: &[&str], _ctx: &mut CommandContext) -> CommandOutput {
        CommandOutput::Quit
    }
}

// ── Pet commands ──

/// A pet command with no arguments that forwards a fixed request.
pub struct ControlCommand {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    request: ControlRequest,
    reply: &'static str,
}

impl Command for ControlCommand {
    fn name(&self) -> &str { self.name }
    fn aliases(&self) -> &[&str] { self.aliases }
    fn description(&self) -> &str { self.description }

    fn execute(&self, _args: &[&str], ctx: &mut CommandContext) -> CommandOutput {
        ctx.bus.publish(Event::Control(self.request));
        if self.reply.is_empty() {
            CommandOutput::Lines(vec![])
        } else {
            CommandOutput::Lines(vec![self.reply.to_string()])
        }
    }
}

pub struct WalkCommand;

impl Command for WalkCommand {
    fn name(&self) -> &str { "walk" }
    fn aliases(&self) -> &[&str] { &["goto"] }
    fn description(&self) -> &str { "Walk to a point (clamped to the screen)" }
    fn usage(&self) -> &str { "walk <x> <y>" }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext) -> CommandOutput {
        let [x, y] = args else {
            return CommandOutput::Lines(vec!["usage: walk <x> <y>".into()]);
        };
        match (x.parse::<f64>(), y.parse::<f64>()) {
            (Ok(x), Ok(y)) if x.is_finite() && y.is_finite() => {
                ctx.bus.publish(Event::Control(ControlRequest::Walk { x, y }));
                CommandOutput::Lines(vec![format!("walking to ({x}, {y})")])
            }
            _ => CommandOutput::Lines(vec![format!("error: not a point: {x} {y}")]),
        }
    }
}

pub struct InteractCommand;

impl Command for InteractCommand {
    fn name(&self) -> &str { "interact" }
    fn description(&self) -> &str { "Let the mouse reach the cat (hover pauses it)" }
    fn usage(&self) -> &str { "interact [on|off]" }

    fn execute(&self, args: &[&str], ctx: &mut CommandContext) -> CommandOutput {
        let setting = match args.first().copied() {
            None => None,
            Some("on") => Some(true),
            Some("off") => Some(false),
            Some(other) => {
                return CommandOutput::Lines(vec![format!(
                    "error: expected 'on' or 'off', got '{}'",
                    other
                )])
            }
        };
        ctx.bus
            .publish(Event::Control(ControlRequest::SetInteractive(setting)));
        CommandOutput::Lines(vec![])
    }
}

/// Create a CommandRegistry pre-loaded with all built-in commands.
pub fn builtin_registry() -> CommandRegistry {
    let mut reg = CommandRegistry::new();
    reg.register(Box::new(ClearCommand));
    reg.register(Box::new(QuitCommand));

    reg.register(Box::new(ControlCommand {
        name: "pause",
        aliases: &["freeze"],
        description: "Freeze the cat where it is",
        request: ControlRequest::Pause,
        reply: "paused",
    }));
    reg.register(Box::new(ControlCommand {
        name: "resume",
        aliases: &["unpause"],
        description: "Unfreeze the cat; it picks something new to do",
        request: ControlRequest::Resume,
        reply: "",
    }));
    reg.register(Box::new(ControlCommand {
        name: "sleep",
        aliases: &["nap"],
        description: "Take a nap now",
        request: ControlRequest::Sleep,
        reply: "",
    }));
    reg.register(Box::new(WalkCommand));
    reg.register(Box::new(ControlCommand {
        name: "wander",
        aliases: &[],
        description: "Let the cat decide what to do next",
        request: ControlRequest::Wander,
        reply: "",
    }));
    reg.register(Box::new(ControlCommand {
        name: "status",
        aliases: &["st"],
        description: "Show behavior, position, happiness and energy",
        request: ControlRequest::Report,
        reply: "",
    }));
    reg.register(Box::new(InteractCommand));
    reg
}
