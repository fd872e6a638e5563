//! Textual renderings of permutations

use std::fmt::{self, Display};

use itertools::Itertools;

use super::Permutation;

/// How a permutation is written by [`Permutation::display_with`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// One-line notation, e.g. `3 1 2`
    #[default]
    OneLine,
    /// Cycle notation, e.g. `(1 3 2)`
    Cycle,
    /// One-line notation followed by cycle notation on the next line
    Both,
}

/// A permutation together with the [Style] it is displayed in
#[derive(Debug, Clone, Copy)]
pub struct StyledPermutation<'a> {
    permutation: &'a Permutation,
    style: Style,
}

impl Display for StyledPermutation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            Style::OneLine => write!(f, "{}", self.permutation),
            Style::Cycle => write!(f, "{}", self.permutation.cycle_notation()),
            Style::Both => write!(
                f,
                "{}\n{}",
                self.permutation,
                self.permutation.cycle_notation()
            ),
        }
    }
}

impl Permutation {
    /// Return a value that displays `self` in the given [Style].
    pub fn display_with(&self, style: Style) -> StyledPermutation<'_> {
        StyledPermutation {
            permutation: self,
            style,
        }
    }

    /// Return the 1-based cycle notation, including fixed points,
    /// e.g. `(1 3 4 2)(5)`.
    pub fn cycle_notation(&self) -> String {
        self.cycles()
            .iter()
            .map(|cycle| format!("({})", cycle.iter().map(|element| element + 1).join(" ")))
            .collect()
    }

    /// Return the rows of a plot of `self`, from the largest value to the smallest.
    ///
    /// Each cell is right-aligned to `width` characters,
    /// or more if the largest value needs more digits.
    pub fn pretty_lines(&self, width: usize) -> Vec<String> {
        let n = self.len();
        let width = width.max(n.to_string().len());
        let blank = " ".repeat(width);

        (0..n)
            .rev()
            .map(|value| {
                self.values
                    .iter()
                    .map(|&other| {
                        if other == value {
                            format!("{:>width$}", value + 1)
                        } else {
                            blank.clone()
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Return a plot of `self` as a multi-line string, see [`Permutation::pretty_lines`].
    pub fn pretty_out(&self, width: usize) -> String {
        self.pretty_lines(width).join("\n")
    }

    /// Return a TikZ picture of the plot of `self`.
    pub fn to_tikz(&self) -> String {
        let n = self.len();
        let mut lines = vec![
            r"\begin{tikzpicture}[scale=.3,baseline=(current bounding box.center)]".to_owned(),
            format!(r"\draw[ultra thick] (1,0) -- ({n},0);"),
            format!(r"\draw[ultra thick] (0,1) -- (0,{n});"),
            format!(r"\foreach \x in {{1,...,{n}}} {{"),
            "\t".to_owned() + r"\draw[thick] (\x,.09)--(\x,-.5);",
            "\t".to_owned() + r"\draw[thick] (.09,\x)--(-.5,\x);",
            "}".to_owned(),
        ];
        lines.extend(self.values.iter().enumerate().map(|(index, value)| {
            format!(
                r"\draw[fill=black] ({},{}) circle (5pt);",
                index + 1,
                value + 1
            )
        }));

        format!("{}\n\\end{{tikzpicture}}", lines.join("\n\t"))
    }
}
