use std::ops::Range;

use crate::sink::{Origin, OutputSink};

/// Exclusive upper bound shared by every counting task.
pub const COUNT_UPPER_BOUND: usize = 10;

/// Values a task with `label` emits: from the label's byte length up to, not including,
/// [`COUNT_UPPER_BOUND`]. Empty once the label reaches the bound.
pub fn counting_range(label: &str) -> Range<usize> {
  label.len()..COUNT_UPPER_BOUND
}

/// Emits every value of [`counting_range`] in ascending order. Never suspends.
pub fn count_from_label(label: &str, sink: &dyn OutputSink, origin: Origin) {
  for i in counting_range(label) {
    sink.emit(origin, i);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sink::RecordingSink;
  use rstest::rstest;

  #[rstest]
  #[case("", (0..10).collect())]
  #[case("e", (1..10).collect())]
  #[case("ab", (2..10).collect())]
  #[case("123456789", vec![9])]
  #[case("0123456789", vec![])]
  #[case("a label well past ten bytes", vec![])]
  fn emits_from_label_length_to_bound(#[case] label: &str, #[case] expected: Vec<usize>) {
    let sink = RecordingSink::new();
    count_from_label(label, &sink, Origin::Task(0));
    assert_eq!(sink.values(), expected);
  }

  #[test]
  fn length_is_counted_in_bytes() {
    // two chars, four bytes
    assert_eq!(counting_range("éé"), 4..10);
  }

  #[test]
  fn emissions_carry_the_given_origin() {
    let sink = RecordingSink::new();
    count_from_label("abcdefgh", &sink, Origin::Task(2));
    assert_eq!(sink.records(), vec![(Origin::Task(2), 8), (Origin::Task(2), 9)]);
  }
}
