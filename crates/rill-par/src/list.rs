//! Generic comma-separated list parsing, grounded on the reference
//! implementation's templated `ParseList`: call an element generator
//! until it yields nothing, consuming a comma between elements, then
//! diagnose a trailing comma after the fact rather than special-casing
//! it in the loop.
//!
//! `ctx` is threaded through explicitly rather than captured by the
//! closures (unlike the C++ original, where both callables simply
//! close over `this`) so the two closures never need to hold
//! overlapping mutable borrows of the parser.

pub fn parse_list<T, C>(
    ctx: &mut C,
    mut generate: impl FnMut(&mut C) -> Option<T>,
    mut consume_comma: impl FnMut(&mut C) -> bool,
) -> (Vec<T>, bool) {
    let mut items = Vec::new();
    let mut comma_count = 0usize;

    while let Some(item) = generate(ctx) {
        items.push(item);
        if consume_comma(ctx) {
            comma_count += 1;
        } else {
            break;
        }
    }

    let trailing_comma = !items.is_empty() && comma_count == items.len();
    (items, trailing_comma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_no_trailing_comma() {
        let mut values = Vec::<i32>::new().into_iter();
        let (items, trailing) = parse_list(&mut values, |v| v.next(), |_| false);
        assert!(items.is_empty());
        assert!(!trailing);
    }

    #[test]
    fn trailing_comma_detected() {
        struct State {
            values: std::vec::IntoIter<i32>,
            commas: std::vec::IntoIter<bool>,
        }
        let mut state = State {
            values: vec![1, 2].into_iter(),
            commas: vec![true, true].into_iter(),
        };
        let (items, trailing) = parse_list(
            &mut state,
            |s| s.values.next(),
            |s| s.commas.next().unwrap_or(false),
        );
        assert_eq!(items, vec![1, 2]);
        assert!(trailing);
    }

    #[test]
    fn no_trailing_comma_when_last_separator_absent() {
        struct State {
            values: std::vec::IntoIter<i32>,
            commas: std::vec::IntoIter<bool>,
        }
        let mut state = State {
            values: vec![1, 2].into_iter(),
            commas: vec![true, false].into_iter(),
        };
        let (items, trailing) = parse_list(
            &mut state,
            |s| s.values.next(),
            |s| s.commas.next().unwrap_or(false),
        );
        assert_eq!(items, vec![1, 2]);
        assert!(!trailing);
    }
}
