pub mod fibonacci;
pub mod palindrome;
pub mod sorting;

/// The fixed challenge catalog. Challenges are never created or mutated at
/// runtime; each carries the point weight awarded for a successful attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Challenge {
    Fibonacci,
    Palindrome,
    Sorting,
}

impl Challenge {
    pub fn id(self) -> i64 {
        match self {
            Challenge::Fibonacci => 1,
            Challenge::Palindrome => 2,
            Challenge::Sorting => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Challenge::Fibonacci => "Fibonacci",
            Challenge::Palindrome => "Palindrome",
            Challenge::Sorting => "Sorting",
        }
    }

    pub fn weight(self) -> i64 {
        match self {
            Challenge::Fibonacci => 10,
            Challenge::Palindrome => 5,
            Challenge::Sorting => 8,
        }
    }
}
