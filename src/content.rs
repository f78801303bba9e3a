//! Static popup text for the named parts of the model.

/// Title and body shown when a part is selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupContent {
  pub title: String,
  pub text: String,
}

/// Title used for parts that carry no name at all.
pub const UNNAMED_TITLE: &str = "Component";

const TABLE: &[(&str, &str, &str)] = &[
  (
    "spring",
    "Spring",
    "A coiled steel spring that stores the energy released when the egg opens.",
  ),
  (
    "top_shell",
    "Top Shell",
    "The upper half of the golden shell. It lifts away on the hinge to reveal the mechanism.",
  ),
  (
    "bottom_shell",
    "Bottom Shell",
    "The lower half of the golden shell, carrying the base and the drive train.",
  ),
  (
    "hinge",
    "Hinge",
    "Joins both shell halves and limits how far the lid can swing open.",
  ),
  (
    "gear_train",
    "Gear Train",
    "A reduction of small gears that turns the spring's release into a slow opening motion.",
  ),
  (
    "crank",
    "Crank",
    "Winds the spring. A few turns are enough for one full opening.",
  ),
];

/// Looks up the popup for a part name; unknown names get their own name as
/// title and no text.
pub fn lookup(name: &str) -> PopupContent {
  TABLE
    .iter()
    .find(|(key, _, _)| *key == name)
    .map(|(_, title, text)| PopupContent {
      title: title.to_string(),
      text: text.to_string(),
    })
    .unwrap_or_else(|| PopupContent {
      title: name.to_string(),
      text: String::new(),
    })
}

/// Node names the table expects to find in the asset.
pub fn expected_names() -> impl Iterator<Item = &'static str> {
  TABLE.iter().map(|(key, _, _)| *key)
}
