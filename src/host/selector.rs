//! Minimal CSS selector support for [`super::memory::MemoryDom`]:
//! type, `#id`, `.class`, `*`, descendant combinators and comma lists.

use crate::foundation::error::{ParallaxError, ParallaxResult};

/// Borrowed view of the element attributes a selector can test.
#[derive(Clone, Copy, Debug)]
pub struct ElementRef<'a> {
    pub tag: &'a str,
    pub id: Option<&'a str>,
    pub classes: &'a [String],
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, el: &ElementRef<'_>) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(el.tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.classes.contains(c))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    // each entry is a descendant chain, outermost first
    alternatives: Vec<Vec<Compound>>,
}

impl SelectorList {
    pub fn parse(input: &str) -> ParallaxResult<Self> {
        let mut alternatives = Vec::new();
        for part in input.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(ParallaxError::selector(format!(
                    "empty selector in '{input}'"
                )));
            }
            let chain = part
                .split_whitespace()
                .map(|c| parse_compound(c, input))
                .collect::<ParallaxResult<Vec<_>>>()?;
            alternatives.push(chain);
        }
        Ok(Self { alternatives })
    }

    /// `chain[0]` is the candidate element, followed by its ancestors
    /// nearest first.
    pub fn matches(&self, chain: &[ElementRef<'_>]) -> bool {
        self.alternatives.iter().any(|alt| chain_matches(alt, chain))
    }
}

fn chain_matches(compounds: &[Compound], chain: &[ElementRef<'_>]) -> bool {
    let Some((subject, ancestors)) = compounds.split_last() else {
        return false;
    };
    let Some((el, mut rest)) = chain.split_first() else {
        return false;
    };
    if !subject.matches(el) {
        return false;
    }
    for compound in ancestors.iter().rev() {
        match rest.iter().position(|a| compound.matches(a)) {
            Some(pos) => rest = &rest[pos + 1..],
            None => return false,
        }
    }
    true
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident<'a>(s: &'a str, full: &str) -> ParallaxResult<(&'a str, &'a str)> {
    let end = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
    if end == 0 {
        return Err(ParallaxError::selector(format!(
            "expected identifier in '{full}'"
        )));
    }
    Ok((&s[..end], &s[end..]))
}

fn parse_compound(src: &str, full: &str) -> ParallaxResult<Compound> {
    let mut out = Compound::default();
    let mut rest = src;

    if let Some(r) = rest.strip_prefix('*') {
        rest = r;
    } else if rest.starts_with(is_ident_char) {
        let (tag, r) = take_ident(rest, full)?;
        out.tag = Some(tag.to_string());
        rest = r;
    }

    while let Some(c) = rest.chars().next() {
        let tail = &rest[c.len_utf8()..];
        match c {
            '.' => {
                let (class, r) = take_ident(tail, full)?;
                out.classes.push(class.to_string());
                rest = r;
            }
            '#' => {
                let (id, r) = take_ident(tail, full)?;
                if out.id.is_some() {
                    return Err(ParallaxError::selector(format!(
                        "duplicate id in '{full}'"
                    )));
                }
                out.id = Some(id.to_string());
                rest = r;
            }
            other => {
                return Err(ParallaxError::selector(format!(
                    "unsupported character '{other}' in '{full}'"
                )));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/host/selector.rs"]
mod tests;
