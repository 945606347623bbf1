// the collection of utility functions for bracket checking before parsing

/// Position of the first bracket that has no pair, `None` if every '(' is closed by a ')'.
/// For an unclosed '(' the position of the last unclosed one is reported.
pub fn find_unpaired_bracket(s: &str) -> Option<usize> {
    let mut stack = Vec::new();

    for (i, c) in s.chars().enumerate() {
        match c {
            '(' => stack.push(i),
            ')' => {
                if stack.pop().is_none() {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    stack.pop()
}
