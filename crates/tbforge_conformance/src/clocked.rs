//! A cycle stepper for the clocked processes in generated harness text.
//!
//! Only the statement forms the generator emits are understood: nested
//! `if (..) then` / `else` / `end if;` blocks, `rising_edge`, `<` and `=`
//! comparisons, and signal assignments whose right-hand side is a bit
//! literal, an integer, a name, or a name plus or minus a term. Assignments
//! take effect after the whole body has run, as VHDL signal updates do.

use std::collections::HashMap;

/// One process of a generated harness, with the harness constants it reads
/// and the current value of every signal it drives.
#[derive(Debug, Clone)]
pub struct ClockedProcess {
    body: Vec<String>,
    constants: HashMap<String, i64>,
    signals: HashMap<String, i64>,
}

impl ClockedProcess {
    /// Extracts the process labelled `label` from `text`. Every
    /// `constant <NAME> : <type> := <integer>;` declaration in `text` is
    /// available to its expressions. Driven signals start at 0.
    pub fn from_harness(text: &str, label: &str) -> Option<Self> {
        let header = format!("{label} : process");
        let footer = format!("end process {label};");
        let mut lines = text.lines().map(str::trim);
        lines.find(|line| line.starts_with(&header))?;
        let mut body = Vec::new();
        for line in lines.by_ref() {
            if line == footer {
                return Some(Self::new(text, body));
            }
            if line.is_empty() || line.starts_with("--") || line == "begin" {
                continue;
            }
            body.push(line.to_string());
        }
        None
    }

    fn new(text: &str, body: Vec<String>) -> Self {
        let constants = text
            .lines()
            .filter_map(|line| {
                let decl = line.trim().strip_prefix("constant ")?;
                let (name, rest) = decl.split_once(':')?;
                let (_, value) = rest.split_once(":=")?;
                let value = value.trim().trim_end_matches(';').parse().ok()?;
                Some((name.trim().to_string(), value))
            })
            .collect();
        let signals = body
            .iter()
            .filter_map(|line| line.split_once("<=").map(|(target, _)| target.trim()))
            .map(|target| (target.to_string(), 0))
            .collect();
        Self {
            body,
            constants,
            signals,
        }
    }

    /// Drives an input the process reads, such as the reset.
    pub fn set(&mut self, name: &str, value: i64) {
        self.signals.insert(name.to_string(), value);
    }

    /// The current value of a signal, with `'1'` read as 1.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.signals.get(name).copied()
    }

    /// The value of a harness constant.
    pub fn constant(&self, name: &str) -> Option<i64> {
        self.constants.get(name).copied()
    }

    /// Runs the body once for a rising clock edge.
    pub fn rising_edge(&mut self) -> Result<(), String> {
        // (enclosing block active, condition of the current branch)
        let mut blocks: Vec<(bool, bool)> = Vec::new();
        let mut updates = Vec::new();
        for line in &self.body {
            let active = blocks.last().map_or(true, |&(outer, cond)| outer && cond);
            if let Some(cond) = line.strip_prefix("if ").and_then(|l| l.strip_suffix(" then")) {
                blocks.push((active, self.condition(cond)?));
            } else if line == "else" {
                let block = blocks.last_mut().ok_or("'else' outside an if block")?;
                block.1 = !block.1;
            } else if line == "end if;" {
                blocks.pop().ok_or("'end if' outside an if block")?;
            } else if let Some((target, expr)) = line.split_once("<=") {
                if active {
                    let value = self.eval(expr.trim().trim_end_matches(';'))?;
                    updates.push((target.trim().to_string(), value));
                }
            } else {
                return Err(format!("unsupported statement '{line}'"));
            }
        }
        if !blocks.is_empty() {
            return Err("unterminated if block".to_string());
        }
        self.signals.extend(updates);
        Ok(())
    }

    fn condition(&self, cond: &str) -> Result<bool, String> {
        if cond.starts_with("rising_edge(") {
            return Ok(true);
        }
        let inner = cond
            .strip_prefix('(')
            .and_then(|c| c.strip_suffix(')'))
            .unwrap_or(cond);
        if let Some((lhs, rhs)) = inner.split_once(" < ") {
            Ok(self.eval(lhs)? < self.eval(rhs)?)
        } else if let Some((lhs, rhs)) = inner.split_once(" = ") {
            Ok(self.eval(lhs)? == self.eval(rhs)?)
        } else {
            Err(format!("unsupported condition '{cond}'"))
        }
    }

    fn eval(&self, expr: &str) -> Result<i64, String> {
        let expr = expr.trim();
        if let Some((lhs, rhs)) = expr.split_once('+') {
            return Ok(self.eval(lhs)? + self.eval(rhs)?);
        }
        if let Some((lhs, rhs)) = expr.split_once('-') {
            return Ok(self.eval(lhs)? - self.eval(rhs)?);
        }
        match expr {
            "'0'" => return Ok(0),
            "'1'" => return Ok(1),
            _ => {}
        }
        if let Ok(value) = expr.parse() {
            return Ok(value);
        }
        self.constants
            .get(expr)
            .or_else(|| self.signals.get(expr))
            .copied()
            .ok_or_else(|| format!("unknown name '{expr}'"))
    }
}
