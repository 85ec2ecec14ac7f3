//! Built-in console commands.

use devcon_types::error::{ConsoleError, Result};

use crate::registry::{CommandSpec, SignatureSpec};

/// Every built-in command, in registration order.
///
/// Hosts append their own specs to this list before building the registry.
pub fn builtin_commands() -> Vec<CommandSpec> {
    vec![
        help_cmd(),
        print_cmd(),
        clear_cmd(),
        open_cmd(),
        close_cmd(),
        alias_cmd(),
        event_cmd(),
        fontsize_cmd(),
        delay_cmd(),
        exec_cmd(),
    ]
}

/// The capture at `index`, or an error naming the missing argument.
fn arg(args: &[String], index: usize) -> Result<&str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| ConsoleError::InvalidArgument(format!("missing argument {index}")))
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize) -> Result<T> {
    let raw = arg(args, index)?;
    raw.parse()
        .map_err(|_| ConsoleError::InvalidArgument(format!("'{raw}' is out of range")))
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

fn help_cmd() -> CommandSpec {
    CommandSpec::new("help", "lists every command").signature(
        SignatureSpec::grammar("help", "lists every command with its description")
            .bind(|console, _| {
                let lines: Vec<String> = console
                    .registry()
                    .commands()
                    .iter()
                    .map(|cmd| format!("{} - {}", cmd.name(), cmd.description()))
                    .collect();
                console.info(&lines.join("\n"));
                console.info("Type '<command> ?' or 'help <command>' for its signatures");
                Ok(())
            }),
    )
}

// ---------------------------------------------------------------------------
// print / clear
// ---------------------------------------------------------------------------

fn print_cmd() -> CommandSpec {
    CommandSpec::new("print", "prints text to the console").signature(
        SignatureSpec::grammar("print <text:s>", "prints everything after the 'print' keyword")
            .bind(|console, args| {
                let text = arg(args, 0)?;
                console.info(text);
                Ok(())
            }),
    )
}

fn clear_cmd() -> CommandSpec {
    CommandSpec::new("clear", "clears the console").signature(
        SignatureSpec::grammar("clear", "clears all contents of the console").bind(|console, _| {
            console.clear();
            Ok(())
        }),
    )
}

// ---------------------------------------------------------------------------
// open / close
// ---------------------------------------------------------------------------

fn open_cmd() -> CommandSpec {
    CommandSpec::new("open", "opens the console").signature(
        SignatureSpec::grammar("open", "opens the console, useful for automation").bind(
            |console, _| {
                console.open();
                Ok(())
            },
        ),
    )
}

fn close_cmd() -> CommandSpec {
    CommandSpec::new("close", "closes the console").signature(
        SignatureSpec::grammar("close", "closes the console, useful for automation").bind(
            |console, _| {
                console.close();
                Ok(())
            },
        ),
    )
}

// ---------------------------------------------------------------------------
// alias
// ---------------------------------------------------------------------------

fn alias_cmd() -> CommandSpec {
    CommandSpec::new("alias", "manages command aliases")
        .signature(
            SignatureSpec::grammar(
                "alias new <alias:s> to <commands:s>",
                "registers an alias for ';'-separated commands",
            )
            .bind(|console, args| console.register_alias(arg(args, 0)?, arg(args, 1)?)),
        )
        .signature(
            SignatureSpec::grammar("alias print <alias:s>", "prints an alias, or 'all' of them")
                .bind(|console, args| console.print_alias(arg(args, 0)?)),
        )
        .signature(
            SignatureSpec::grammar("alias rem <alias:s>", "removes an alias, or 'all' of them")
                .bind(|console, args| {
                    console.deregister_alias(arg(args, 0)?);
                    Ok(())
                }),
        )
}

// ---------------------------------------------------------------------------
// event
// ---------------------------------------------------------------------------

fn event_cmd() -> CommandSpec {
    CommandSpec::new("event", "binds commands to lifecycle events")
        .signature(
            SignatureSpec::grammar(
                "event onstartup <commands:s>",
                "runs the commands when the console starts",
            )
            .bind(|console, args| console.register_event("OnStartup", arg(args, 0)?)),
        )
        .signature(
            SignatureSpec::grammar(
                "event onshutdown <commands:s>",
                "runs the commands when the console shuts down",
            )
            .bind(|console, args| console.register_event("OnShutdown", arg(args, 0)?)),
        )
        .signature(
            SignatureSpec::grammar("event rem <hook:s>", "removes the binding of an event")
                .bind(|console, args| console.remove_event(arg(args, 0)?)),
        )
        .signature(SignatureSpec::grammar("event list", "lists every binding").bind(
            |console, _| {
                console.list_events();
                Ok(())
            },
        ))
}

// ---------------------------------------------------------------------------
// fontsize
// ---------------------------------------------------------------------------

fn fontsize_cmd() -> CommandSpec {
    CommandSpec::new("fontsize", "changes the font size")
        .signature(
            SignatureSpec::grammar("fontsize reset", "resets the font size to its default").bind(
                |console, _| {
                    console.reset_font_size();
                    Ok(())
                },
            ),
        )
        .signature(
            SignatureSpec::grammar("fontsize <fs:i>", "sets the font size").bind(
                |console, args| {
                    let size: i32 = parse_arg(args, 0)?;
                    console.set_font_size(size);
                    Ok(())
                },
            ),
        )
}

// ---------------------------------------------------------------------------
// delay / exec
// ---------------------------------------------------------------------------

fn delay_cmd() -> CommandSpec {
    CommandSpec::new("delay", "pauses running sequences").signature(
        SignatureSpec::grammar(
            "delay <seconds:i>",
            "holds back the next sequenced statements for some seconds",
        )
        .bind(|console, args| {
            // Float, so oversized values are clamped instead of failing to parse.
            let seconds: f64 = parse_arg(args, 0)?;
            console.request_delay(seconds);
            Ok(())
        }),
    )
}

fn exec_cmd() -> CommandSpec {
    CommandSpec::new("exec", "runs a sequence of commands").signature(
        SignatureSpec::grammar("exec <commands:s>", "runs ';'-separated commands in order")
            .bind(|console, args| console.run_sequence(arg(args, 0)?)),
    )
}
