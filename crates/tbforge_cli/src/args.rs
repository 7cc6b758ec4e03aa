//! Separating unknown flags from the command line before clap sees it.
//!
//! An unrecognized flag is a warning, not a usage error, so the raw argument
//! list is split against the flags the [`clap::Command`] actually declares.

use clap::Command;

/// The command line split into what clap should parse and what it should not.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitArgs {
    /// Arguments to hand to clap, starting with the program name.
    pub known: Vec<String>,
    /// Unrecognized flags, each with its value if one was attached.
    pub unknown: Vec<String>,
}

struct FlagTable {
    longs: Vec<(String, bool)>,
    shorts: Vec<(char, bool)>,
}

impl FlagTable {
    fn from_command(cmd: &Command) -> Self {
        let mut cmd = cmd.clone();
        cmd.build();
        let mut longs = vec![("help".to_string(), false), ("version".to_string(), false)];
        let mut shorts = vec![('h', false), ('V', false)];
        for arg in cmd.get_arguments() {
            let takes_value = arg.get_action().takes_values();
            if let Some(long) = arg.get_long() {
                longs.push((long.to_string(), takes_value));
            }
            if let Some(short) = arg.get_short() {
                shorts.push((short, takes_value));
            }
        }
        Self { longs, shorts }
    }

    fn long(&self, name: &str) -> Option<bool> {
        self.longs.iter().find(|(l, _)| l == name).map(|(_, v)| *v)
    }

    fn short(&self, name: char) -> Option<bool> {
        self.shorts.iter().find(|(s, _)| *s == name).map(|(_, v)| *v)
    }
}

/// Splits `argv` (including the program name) into known and unknown parts.
///
/// A flag is known if `cmd` declares it. The value of a known flag that takes
/// one is kept with it, whether attached (`--fp=x.vhd`) or separate
/// (`--fp x.vhd`). An unknown flag swallows a following token that does not
/// look like a flag, so its value does not turn into a stray positional.
pub fn split_known(cmd: &Command, argv: impl IntoIterator<Item = String>) -> SplitArgs {
    let table = FlagTable::from_command(cmd);
    let mut split = SplitArgs::default();
    let mut iter = argv.into_iter().peekable();

    if let Some(program) = iter.next() {
        split.known.push(program);
    }

    while let Some(arg) = iter.next() {
        if arg == "--" {
            split.known.push(arg);
            split.known.extend(iter.by_ref());
            break;
        }

        let (known, inline_value, takes_value) = if let Some(body) = arg.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, _)) => (name, true),
                None => (body, false),
            };
            match table.long(name) {
                Some(takes) => (true, inline, takes),
                None => (false, inline, false),
            }
        } else if let Some(body) = arg.strip_prefix('-').filter(|b| !b.is_empty()) {
            let switches = body.chars().skip(1).all(|c| table.short(c) == Some(false));
            match body.chars().next().and_then(|c| table.short(c)) {
                // `-q`, `-qv`: every letter must be a known switch.
                Some(false) if switches => (true, false, false),
                // `-c value` or `-cvalue`.
                Some(true) => (true, body.chars().count() > 1, true),
                _ => (false, false, false),
            }
        } else {
            split.known.push(arg);
            continue;
        };

        if known {
            split.known.push(arg);
            if takes_value && !inline_value {
                if let Some(value) = iter.next() {
                    split.known.push(value);
                }
            }
        } else {
            let mut flag = arg;
            if !inline_value {
                if let Some(value) = iter.next_if(|next| !next.starts_with('-')) {
                    flag = format!("{flag} {value}");
                }
            }
            split.unknown.push(flag);
        }
    }
    split
}
