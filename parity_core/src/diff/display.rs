//! Terminal rendering of comparison results

use std::fmt::Display;

use colored::Colorize;

use super::{Category, ComparisonResult, DiffItem, DiffType};

impl Display for DiffItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values = self
            .values
            .iter()
            .map(|(id, v)| format!("{id}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        let text = match self.diff_type {
            DiffType::Added => format!("+ {}", self.path).green(),
            DiffType::Removed => format!("- {}", self.path).red(),
            DiffType::Changed => format!("~ {}", self.path).yellow(),
            DiffType::Unchanged => format!("  {}", self.path).dimmed(),
        };
        write!(f, "{text}  ({values})")
    }
}

impl Display for ComparisonResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut text = "Comparing:\n".to_owned();
        for profile in &self.profiles {
            text += format!("  {} ({})\n", profile.name, profile.id).as_str();
        }

        if self.differences.is_empty() {
            text += "\nNo differences found\n";
            return write!(f, "{text}");
        }

        for category in Category::ALL {
            let mut items = self.items_in(category).peekable();
            if items.peek().is_none() {
                continue;
            }
            text += format!(
                "\n{} ({})\n",
                category.title().bold(),
                self.summary.get(&category).copied().unwrap_or_default()
            )
            .as_str();
            for item in items {
                text += format!("  {item}\n").as_str();
            }
        }

        text += format!("\n{} differences\n", self.total_differences).as_str();
        write!(f, "{text}")
    }
}
