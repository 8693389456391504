//! Macro expression analysis.
//!
//! Mapping values may be macro expressions such as
//! `m(shift_l, k(a)).w(100).k(b)` instead of plain key names. For
//! migration purposes only one question matters: which event codes does
//! a macro need its output device to support? This module answers that
//! without executing anything.
//!
//! Supported forms:
//!
//! - `k(x)` / `key(x)` - press and release a key
//! - `m(mod, macro)` / `modify(mod, macro)` - hold a modifier around a macro
//! - `h(x)` / `hold(x)` - hold a key or macro
//! - `r(n, macro)` / `repeat(n, macro)` - repeat a macro
//! - `w(ms)` / `wait(ms)` - sleep
//! - `e(type, code, value)` / `event(type, code, value)` - raw event
//! - `mouse(direction, speed)` - relative pointer motion
//! - `wheel(direction, speed)` - wheel motion
//! - `a+b+c` - key combination
//! - `.`-chained calls, e.g. `k(a).w(10).k(b)`

use evdev::RelativeAxisType;

use crate::error::{KrError, Result};
use crate::event::{Capabilities, EventKind};
use crate::symbols::SymbolTable;

/// Heuristic used to distinguish macros from plain key names.
///
/// A combination (`a+b`) or anything in call form (`name(...)`) is a
/// macro; everything else is treated as a single symbol.
pub fn is_macro(symbol: &str) -> bool {
    let s = symbol.trim();
    if s.contains('+') {
        return true;
    }
    match (s.find('('), s.find(')')) {
        (Some(open), Some(close)) => open < close,
        _ => false,
    }
}

/// Extracts the capabilities a macro expression requires.
pub struct MacroParser<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> MacroParser<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// Compute the event codes `symbol` needs to be able to emit.
    pub fn capabilities(&self, symbol: &str) -> Result<Capabilities> {
        let source = symbol.trim();
        let mut caps = Capabilities::new();

        if source.contains('+') && !source.contains('(') {
            // Combination form: every part is a plain key name.
            for part in source.split('+') {
                let part = part.trim();
                if part.is_empty() {
                    return Err(self.fail(source, "empty combination element"));
                }
                caps.keys.insert(self.symbols.get(part)?);
            }
            return Ok(caps);
        }

        self.parse_chain(source, source, &mut caps)?;
        Ok(caps)
    }

    fn fail(&self, source: &str, reason: impl Into<String>) -> KrError {
        KrError::MacroParse {
            symbol: source.to_string(),
            reason: reason.into(),
        }
    }

    /// Parse a `.`-separated chain of calls.
    fn parse_chain(&self, source: &str, chain: &str, caps: &mut Capabilities) -> Result<()> {
        for task in split_top_level(chain, '.') {
            let task = task.trim();
            if task.is_empty() {
                return Err(self.fail(source, "empty task in macro chain"));
            }
            self.parse_task(source, task, caps)?;
        }
        Ok(())
    }

    /// Parse a single `name(args)` call.
    fn parse_task(&self, source: &str, task: &str, caps: &mut Capabilities) -> Result<()> {
        let open = task
            .find('(')
            .ok_or_else(|| self.fail(source, format!("expected a call, got '{task}'")))?;
        if !task.ends_with(')') {
            return Err(self.fail(source, format!("unbalanced parentheses in '{task}'")));
        }
        let name = task[..open].trim().to_lowercase();
        let args: Vec<&str> = {
            let inner = &task[open + 1..task.len() - 1];
            if inner.trim().is_empty() {
                Vec::new()
            } else {
                split_top_level(inner, ',').into_iter().map(str::trim).collect()
            }
        };

        match name.as_str() {
            "k" | "key" => {
                let arg = self.expect_args(source, &name, &args, 1)?[0];
                caps.keys.insert(self.symbols.get(unquote(arg))?);
            }
            "m" | "modify" => {
                let args = self.expect_args(source, &name, &args, 2)?;
                caps.keys.insert(self.symbols.get(unquote(args[0]))?);
                self.parse_nested(source, args[1], caps)?;
            }
            "h" | "hold" => {
                if let Some(&arg) = args.first() {
                    self.parse_nested(source, arg, caps)?;
                }
            }
            "r" | "repeat" => {
                let args = self.expect_args(source, &name, &args, 2)?;
                self.expect_number(source, &name, args[0])?;
                self.parse_nested(source, args[1], caps)?;
            }
            "w" | "wait" => {
                let arg = self.expect_args(source, &name, &args, 1)?[0];
                self.expect_number(source, &name, arg)?;
            }
            "e" | "event" => {
                let args = self.expect_args(source, &name, &args, 3)?;
                self.parse_raw_event(source, &args, caps)?;
            }
            "mouse" => {
                let args = self.expect_args(source, &name, &args, 2)?;
                let axis = match unquote(args[0]).to_lowercase().as_str() {
                    "up" | "down" => RelativeAxisType::REL_Y,
                    "left" | "right" => RelativeAxisType::REL_X,
                    other => {
                        return Err(
                            self.fail(source, format!("unknown mouse direction '{other}'"))
                        );
                    }
                };
                caps.rel.insert(axis.0);
            }
            "wheel" => {
                let args = self.expect_args(source, &name, &args, 2)?;
                let axis = match unquote(args[0]).to_lowercase().as_str() {
                    "up" | "down" => RelativeAxisType::REL_WHEEL,
                    "left" | "right" => RelativeAxisType::REL_HWHEEL,
                    other => {
                        return Err(
                            self.fail(source, format!("unknown wheel direction '{other}'"))
                        );
                    }
                };
                caps.rel.insert(axis.0);
            }
            other => {
                return Err(self.fail(source, format!("unknown macro function '{other}'")));
            }
        }
        Ok(())
    }

    /// A nested argument is either another macro or a plain key name.
    fn parse_nested(&self, source: &str, arg: &str, caps: &mut Capabilities) -> Result<()> {
        let arg = unquote(arg);
        if arg.is_empty() {
            return Ok(());
        }
        if is_macro(arg) {
            self.parse_chain(source, arg, caps)
        } else {
            caps.keys.insert(self.symbols.get(arg)?);
            Ok(())
        }
    }

    /// `e(type, code, value)`: only EV_KEY and EV_REL contribute to the
    /// capability sets; other event types have no target implications.
    fn parse_raw_event(&self, source: &str, args: &[&str], caps: &mut Capabilities) -> Result<()> {
        let ev_type = self.expect_number(source, "event", args[0])?;
        let code = self.expect_number(source, "event", args[1])?;
        self.expect_number(source, "event", args[2])?;

        let code = u16::try_from(code)
            .map_err(|_| self.fail(source, format!("event code {code} out of range")))?;
        if ev_type == i64::from(EventKind::Key.code()) {
            caps.keys.insert(code);
        } else if ev_type == i64::from(EventKind::Relative.code()) {
            caps.rel.insert(code);
        }
        Ok(())
    }

    fn expect_args<'t>(
        &self,
        source: &str,
        name: &str,
        args: &[&'t str],
        count: usize,
    ) -> Result<Vec<&'t str>> {
        if args.len() == count {
            Ok(args.to_vec())
        } else {
            Err(self.fail(
                source,
                format!("{name}() takes {count} argument(s), got {}", args.len()),
            ))
        }
    }

    fn expect_number(&self, source: &str, name: &str, arg: &str) -> Result<i64> {
        unquote(arg)
            .parse::<i64>()
            .map_err(|_| self.fail(source, format!("{name}() expected a number, got '{arg}'")))
    }
}

/// Split on `separator` at parenthesis depth zero.
fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Strip one layer of matching quotes.
fn unquote(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .or_else(|| text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
    stripped.unwrap_or(text)
}
