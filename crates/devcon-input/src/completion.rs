//! Incremental, bash-style tab completion.
//!
//! Each Tab press rebuilds a transient [`MatchList`] from pluggable name
//! sources, narrows a shared-prefix hint, and cycles the displayed match.
//!
//! # Invariants
//!
//! 1. The partial being completed is the substring between the last
//!    separator (space, double quote, semicolon) before the cursor and
//!    the cursor itself; an empty partial makes the whole query a no-op.
//! 2. Matching is ASCII-caseless substring containment, not prefix.
//! 3. Sources are consulted in fixed precedence (variable values,
//!    command arguments, the static argument table, then the global name
//!    pools) and the first source yielding candidates is used
//!    exclusively for that query.
//! 4. Applying a match preserves everything after the cursor and leaves
//!    the cursor at the end of the inserted text. An unambiguous match
//!    applied at end-of-line appends a separator and reseeds a
//!    zero-length hint for the next token.

use crate::matches::MatchList;
use crate::natural::find_ignore_ascii_case;

/// Token separators recognized by the completer.
pub const SEPARATORS: [char; 3] = [' ', '"', ';'];

/// Enumeration interface over the external command/variable registry.
///
/// Every hook receives an `emit` sink to call once per candidate name,
/// with an optional class tag. The default for every hook yields
/// nothing, so a registry implements only what it has.
pub trait CompletionSources {
    /// Values for the variable named by the first token (highest
    /// precedence; e.g. enumerating legal values of a mode variable).
    fn variable_values(&self, _variable: &str, _emit: &mut dyn FnMut(&str, Option<&str>)) {}

    /// Dynamic argument candidates for a command's first argument
    /// (e.g. map names on disk, bindable key names).
    fn command_arguments(&self, _command: &str, _emit: &mut dyn FnMut(&str, Option<&str>)) {}

    /// Static argument-table lookup for a command.
    fn argument_table(&self, _command: &str, _emit: &mut dyn FnMut(&str, Option<&str>)) {}

    /// Global pools: command names, variable names, aliases.
    fn global_names(&self, _emit: &mut dyn FnMut(&str, Option<&str>)) {}
}

/// Result of one completion keystroke, to be applied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The rewritten input line.
    pub line: String,
    /// New cursor byte offset into `line`.
    pub cursor: usize,
    /// Narrowed shared-prefix hint for display.
    pub hint: String,
    /// Number of distinct candidates.
    pub matches: usize,
    /// Total candidates including merged duplicates.
    pub total: u32,
}

/// Collects matching names into a sorted list while narrowing the shared
/// hint buffer.
struct Collector<'a> {
    partial: &'a str,
    list: MatchList,
    shared: Option<String>,
}

impl<'a> Collector<'a> {
    fn new(partial: &'a str) -> Self {
        Self {
            partial,
            list: MatchList::new(),
            shared: None,
        }
    }

    fn accept(&mut self, name: &str, tag: Option<&str>) {
        if find_ignore_ascii_case(name, self.partial).is_none() {
            return;
        }
        match &mut self.shared {
            // First accepted match seeds the hint with the full name; a
            // single-candidate outcome keeps it whole with no narrowing.
            None => self.shared = Some(name.to_string()),
            Some(shared) => narrow(shared, name, self.partial),
        }
        self.list.insert(name, tag);
    }
}

/// Shrink `shared` to the run around its `partial` occurrence that is
/// identical (ASCII-caseless) in `name`.
///
/// The run extends right from the match and left from the match start. A
/// scan that stops because one string ran out alone contributes nothing:
/// when one candidate is a prefix of another's remainder the hint stays
/// at the match, so the hint never suggests characters past a point
/// where a candidate ends. `shared` keeps its own spelling throughout.
fn narrow(shared: &mut String, name: &str, partial: &str) {
    let Some(sp) = find_ignore_ascii_case(shared, partial) else {
        return;
    };
    let Some(np) = find_ignore_ascii_case(name, partial) else {
        return;
    };
    let plen = partial.len();

    let mut right = 0usize;
    let mut si = shared[sp + plen..].chars();
    let mut ni = name[np + plen..].chars();
    loop {
        match (si.next(), ni.next()) {
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => right += a.len_utf8(),
            (None, None) | (Some(_), Some(_)) => break,
            _ => {
                right = 0;
                break;
            }
        }
    }

    let mut left = 0usize;
    let mut si = shared[..sp].chars().rev();
    let mut ni = name[..np].chars().rev();
    loop {
        match (si.next(), ni.next()) {
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => left += a.len_utf8(),
            (None, None) | (Some(_), Some(_)) => break,
            _ => {
                left = 0;
                break;
            }
        }
    }

    *shared = shared[sp - left..sp + plen + right].to_string();
}

/// Byte offset where the segment under completion starts.
fn segment_start(line: &str, cursor: usize) -> usize {
    line[..cursor]
        .rfind(SEPARATORS)
        .map_or(0, |i| i + 1) // separators are all single-byte
}

/// First token of the line before the segment, if any: the command (or
/// variable) name establishing argument context.
fn leading_token(line_head: &str) -> Option<&str> {
    line_head
        .split(|c| SEPARATORS.contains(&c))
        .find(|t| !t.is_empty())
}

/// Incremental completion engine: rebuilds candidates per keystroke,
/// narrows the hint, and cycles the displayed match.
#[derive(Debug, Clone, Default)]
pub struct TabCompletionEngine {
    /// The partial that started the active query. Repeat keystrokes match
    /// against this, not against the applied match now sitting in the
    /// line.
    partial: String,
    /// Mutable shared-prefix buffer shown as the completion hint.
    shared: String,
    /// Name currently displayed in the line (cycle position).
    current: Option<String>,
}

impl TabCompletionEngine {
    /// Create an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The narrowed hint from the last query.
    #[inline]
    #[must_use]
    pub fn hint(&self) -> &str {
        &self.shared
    }

    /// Forget the active query (call when the user edits the line by
    /// hand).
    pub fn reset(&mut self) {
        self.partial.clear();
        self.shared.clear();
        self.current = None;
    }

    /// Run one completion keystroke against `line` with the cursor at
    /// byte offset `cursor`. `reverse` cycles backward (modifier held).
    ///
    /// A keystroke whose segment still shows the previously applied match
    /// continues the active query (cycling); anything else starts a fresh
    /// one. Returns `None`, leaving line and state untouched, when the
    /// segment under the cursor is empty or nothing matches.
    pub fn complete(
        &mut self,
        line: &str,
        cursor: usize,
        reverse: bool,
        sources: &dyn CompletionSources,
    ) -> Option<Completion> {
        let cursor = cursor.min(line.len());
        let seg_start = segment_start(line, cursor);
        let seg = &line[seg_start..cursor];

        let repeat = self.current.as_deref() == Some(seg);
        let partial = if repeat {
            self.partial.clone()
        } else {
            seg.to_string()
        };
        if partial.is_empty() {
            return None;
        }
        if !repeat {
            self.partial = partial.clone();
            self.current = None;
        }

        let context = leading_token(&line[..seg_start]);
        let collector = gather(&partial, context, sources);
        if collector.list.is_empty() {
            self.reset();
            return None;
        }
        self.shared = collector.shared.unwrap_or_default();

        let chosen = collector
            .list
            .cycle(self.current.as_deref(), reverse)?
            .name
            .clone();

        let mut new_line = String::with_capacity(line.len() + chosen.len());
        new_line.push_str(&line[..seg_start]);
        new_line.push_str(&chosen);
        new_line.push_str(&line[cursor..]);
        let mut new_cursor = seg_start + chosen.len();
        self.current = Some(chosen);

        let unambiguous = collector.list.len() == 1;
        if unambiguous && new_cursor == new_line.len() {
            new_line.push(' ');
            new_cursor += 1;
            // Reseed a zero-length hint for the next token; cycling
            // starts over there.
            self.current = None;
            let next_context = leading_token(&new_line[..new_cursor]);
            let next = gather("", next_context, sources);
            self.shared = next.shared.unwrap_or_default();
        }

        Some(Completion {
            line: new_line,
            cursor: new_cursor,
            hint: self.shared.clone(),
            matches: collector.list.len(),
            total: collector.list.total_count(),
        })
    }
}

/// Consult sources in precedence order; the first that yields candidates
/// for `partial` wins the query outright.
fn gather<'a>(
    partial: &'a str,
    context: Option<&str>,
    sources: &dyn CompletionSources,
) -> Collector<'a> {
    let mut collector = Collector::new(partial);
    if let Some(head) = context {
        sources.variable_values(head, &mut |n, t| collector.accept(n, t));
        if collector.list.is_empty() {
            sources.command_arguments(head, &mut |n, t| collector.accept(n, t));
        }
        if collector.list.is_empty() {
            sources.argument_table(head, &mut |n, t| collector.accept(n, t));
        }
    }
    if collector.list.is_empty() {
        sources.global_names(&mut |n, t| collector.accept(n, t));
    }
    collector
}
