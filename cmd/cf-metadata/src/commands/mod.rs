pub mod get;
pub mod set;

use anyhow::Result;
use metadata_core::{MetadataKind, MutationSpec, Transport};
use std::io::Write;

use crate::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Annotations,
    Labels,
    Metadata,
}

/// What an invocation does once its positional arguments are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Usage,
    Get,
    Set,
}

/// Arity rules and usage text for one command
#[derive(Debug)]
pub struct CommandSpec {
    pub command: Command,
    pub name: &'static str,
    pub usage: &'static str,
    /// Accepts change tokens after RESOURCE RESOURCE_NAME
    pub allows_set: bool,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Annotations,
        name: "annotations",
        usage: "cf-metadata annotations RESOURCE RESOURCE_NAME KEY=VAL KEY-",
        allows_set: true,
    },
    CommandSpec {
        command: Command::Labels,
        name: "labels",
        usage: "cf-metadata labels RESOURCE RESOURCE_NAME KEY=VAL KEY-",
        allows_set: true,
    },
    CommandSpec {
        command: Command::Metadata,
        name: "metadata",
        usage: "cf-metadata metadata RESOURCE RESOURCE_NAME",
        allows_set: false,
    },
];

/// RESOURCE RESOURCE_NAME
const TARGET_ARGS: usize = 2;

impl Command {
    pub fn spec(self) -> &'static CommandSpec {
        match self {
            Command::Annotations => &COMMANDS[0],
            Command::Labels => &COMMANDS[1],
            Command::Metadata => &COMMANDS[2],
        }
    }

    /// The single mapping this command works on; `None` means both
    pub fn kind(self) -> Option<MetadataKind> {
        match self {
            Command::Annotations => Some(MetadataKind::Annotations),
            Command::Labels => Some(MetadataKind::Labels),
            Command::Metadata => None,
        }
    }

    pub fn mode(self, arg_count: usize) -> Mode {
        match arg_count {
            n if n < TARGET_ARGS => Mode::Usage,
            TARGET_ARGS => Mode::Get,
            _ if self.spec().allows_set => Mode::Set,
            _ => Mode::Usage,
        }
    }
}

/// Resource type and name an invocation is aimed at
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub resource: &'a str,
    pub name: &'a str,
}

/// Run one invocation. `connect` is only called when the API is needed,
/// and for set mode only after every change token has been validated.
pub fn run<T, F>(
    command: Command,
    args: &[String],
    output: OutputFormat,
    out: &mut dyn Write,
    connect: F,
) -> Result<()>
where
    T: Transport,
    F: FnOnce() -> Result<T>,
{
    let mode = command.mode(args.len());
    tracing::debug!(command = command.spec().name, ?mode, args = args.len(), "Dispatching");

    if mode == Mode::Usage {
        writeln!(out, "{}", command.spec().usage)?;
        return Ok(());
    }

    let target = Target {
        resource: &args[0],
        name: &args[1],
    };

    match (mode, command.kind()) {
        (Mode::Get, Some(kind)) => get::show(&connect()?, kind, target, output, out),
        (Mode::Get, None) => get::show_all(&connect()?, target, output, out),
        (Mode::Set, Some(kind)) => {
            let spec = MutationSpec::parse(kind, &args[TARGET_ARGS..])?;
            set::apply(&connect()?, kind, target, &spec, output, out)
        }
        (Mode::Set, None) | (Mode::Usage, _) => {
            writeln!(out, "{}", command.spec().usage)?;
            Ok(())
        }
    }
}
