//! The declaration state machine.
//!
//! [`DeclarationParser`] is fed one [`DeclLine`] at a time and moves through
//! four states in a single forward pass:
//!
//! ```text
//!            port (            list end
//! Seeking ------------> InPortList ------> Seeking
//!    |      generic (             list end
//!    +----------------> InGenericList ---> Seeking
//!    |  end entity / architecture
//!    +----------------> Done
//! ```
//!
//! In [`ParseMode::Permissive`] a list ends at any line with two or fewer
//! tokens, and a line that cannot be read as an entry also ends the list.
//! [`ParseMode::Strict`] ends lists only at a `)` line and reports unreadable
//! entries as errors instead.

use crate::decl::{read_generic, read_port, Reading};
use crate::lexer::DeclLine;
use tbforge_diagnostics::code::MALFORMED_LINE;
use tbforge_diagnostics::{Diagnostic, DiagnosticSink};
use tbforge_model::Interface;
use tbforge_source::{FileId, Location};

/// Where the parser is within the declaration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParserState {
    /// Looking for the entity name, a list opener, or the end of the entity.
    Seeking,
    /// Reading `port` list entries.
    InPortList,
    /// Reading `generic` list entries.
    InGenericList,
    /// The declaration has ended. Further lines are ignored.
    Done,
}

/// How the parser treats lines it cannot read.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ParseMode {
    /// Short or unreadable lines end the current list without any diagnostic.
    #[default]
    Permissive,
    /// Unreadable lines are reported as `E101` and skipped.
    Strict,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ListKind {
    Port,
    Generic,
}

impl ListKind {
    fn as_str(self) -> &'static str {
        match self {
            ListKind::Port => "port",
            ListKind::Generic => "generic",
        }
    }
}

/// Builds one [`Interface`] from the lines of an entity declaration.
pub struct DeclarationParser<'a> {
    state: ParserState,
    mode: ParseMode,
    file: FileId,
    sink: &'a DiagnosticSink,
    interface: Interface,
}

impl<'a> DeclarationParser<'a> {
    /// Creates a parser in the [`Seeking`](ParserState::Seeking) state.
    pub fn new(file: FileId, sink: &'a DiagnosticSink, mode: ParseMode) -> Self {
        Self {
            state: ParserState::Seeking,
            mode,
            file,
            sink,
            interface: Interface::default(),
        }
    }

    /// The current state.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Consumes one line.
    pub fn feed(&mut self, line: &DeclLine<'_>) {
        match self.state {
            ParserState::Seeking => self.seek(line),
            ParserState::InPortList => self.list_line(line, ListKind::Port),
            ParserState::InGenericList => self.list_line(line, ListKind::Generic),
            ParserState::Done => {}
        }
    }

    /// Returns the interface built so far.
    pub fn finish(self) -> Interface {
        match self.state {
            ParserState::InPortList | ParserState::InGenericList => log::debug!(
                "{}: input ended inside a list ({:?})",
                self.interface.name(),
                self.state
            ),
            ParserState::Seeking | ParserState::Done => {}
        }
        self.interface
    }

    fn set_state(&mut self, state: ParserState, line: u32) {
        if self.state != state {
            log::debug!("line {line}: {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn seek(&mut self, line: &DeclLine<'_>) {
        let Some(first) = line.first_word() else {
            return;
        };
        match first.as_str() {
            "entity" if self.interface.name().is_empty() => {
                if let Some(name) = line.tokens.get(1) {
                    self.interface.set_name(name.trim_end_matches(';'));
                }
            }
            "architecture" => self.set_state(ParserState::Done, line.number),
            "end" if !self.interface.name().is_empty() => {
                let bare = line.tokens.len() == 1;
                if bare || line.has_word("entity") || line.has_word(self.interface.name()) {
                    self.set_state(ParserState::Done, line.number);
                }
            }
            "port" => self.open_list(line, ListKind::Port),
            "generic" => self.open_list(line, ListKind::Generic),
            _ => {}
        }
    }

    fn open_list(&mut self, line: &DeclLine<'_>, kind: ListKind) {
        let state = match kind {
            ListKind::Port => ParserState::InPortList,
            ListKind::Generic => ParserState::InGenericList,
        };
        self.set_state(state, line.number);
        if let Some(rest) = line.after_open_paren() {
            self.list_line(&rest, kind);
        }
    }

    fn list_line(&mut self, line: &DeclLine<'_>, kind: ListKind) {
        match self.mode {
            ParseMode::Permissive if line.tokens.len() <= 2 => {
                // A short line is the list terminator. It may also open the
                // next list or end the entity, so it is seen again by `seek`.
                self.set_state(ParserState::Seeking, line.number);
                self.seek(line);
                return;
            }
            ParseMode::Strict if line.is_blank() => return,
            ParseMode::Strict if line.text.starts_with(')') => {
                self.set_state(ParserState::Seeking, line.number);
                return;
            }
            _ => {}
        }

        let closes_list = match kind {
            ListKind::Port => {
                let reading = read_port(line);
                self.accept(line, reading, |iface, port| {
                    if iface.port(port.name()).is_some() {
                        return Err(format!("duplicate port '{}'", port.name()));
                    }
                    iface.push_port(port);
                    Ok(())
                })
            }
            ListKind::Generic => {
                let reading = read_generic(line);
                self.accept(line, reading, |iface, generic| {
                    if iface.generic(generic.name()).is_some() {
                        return Err(format!("duplicate generic '{}'", generic.name()));
                    }
                    iface.push_generic(generic);
                    Ok(())
                })
            }
        };

        match closes_list {
            Some(true) => self.set_state(ParserState::Seeking, line.number),
            Some(false) => {}
            None => self.malformed(line, kind),
        }
    }

    /// Applies a reading. Returns whether the list closed on this line, or
    /// `None` if the line is malformed.
    fn accept<T>(
        &mut self,
        line: &DeclLine<'_>,
        reading: Reading<T>,
        push: impl FnOnce(&mut Interface, T) -> Result<(), String>,
    ) -> Option<bool> {
        match reading {
            Reading::Item { item, closes_list } => match push(&mut self.interface, item) {
                Ok(()) => Some(closes_list),
                Err(msg) => {
                    self.report(line, msg);
                    None
                }
            },
            Reading::Skipped {
                reason,
                closes_list,
            } => {
                log::debug!("line {}: skipped, {reason}", line.number);
                Some(closes_list)
            }
            Reading::Malformed(msg) => {
                self.report(line, msg);
                None
            }
        }
    }

    fn report(&self, line: &DeclLine<'_>, msg: String) {
        match self.mode {
            ParseMode::Permissive => log::debug!("line {}: {msg}", line.number),
            ParseMode::Strict => self.sink.emit(
                Diagnostic::error(
                    MALFORMED_LINE,
                    format!("malformed declaration line: {msg}"),
                    Location::new(self.file, line.number),
                )
                .with_note(format!("the line is `{}`", line.text)),
            ),
        }
    }

    fn malformed(&mut self, line: &DeclLine<'_>, kind: ListKind) {
        if self.mode == ParseMode::Permissive {
            log::debug!(
                "line {}: {} list truncated after {} entries",
                line.number,
                kind.as_str(),
                match kind {
                    ListKind::Port => self.interface.ports().len(),
                    ListKind::Generic => self.interface.generics().len(),
                }
            );
            self.set_state(ParserState::Seeking, line.number);
        }
    }
}
