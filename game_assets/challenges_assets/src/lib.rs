//! Question pool for the level 2 loop challenge.

pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopChallenge {
    pub id: u32,
    pub prompt_code: &'static str,
    pub question: &'static str,
    pub options: [&'static str; OPTION_COUNT],
    pub correct_answer: usize,
    pub explanation: &'static str,
}

impl LoopChallenge {
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_answer
    }
}

/// The pool, in the order used when the draw restarts after exhaustion.
pub static LOOP_CHALLENGES: [LoopChallenge; 6] = [
    LoopChallenge {
        id: 1,
        prompt_code: "for i in 0..5 {\n    print(i);\n}",
        question: "How many times does the body run?",
        options: ["4", "5", "6", "Forever"],
        correct_answer: 1,
        explanation: "The range 0..5 excludes its end, so i takes the values 0 to 4.",
    },
    LoopChallenge {
        id: 2,
        prompt_code: "let mut n = 10;\nwhile n > 0 {\n    n -= 3;\n}",
        question: "What is the value of n after the loop?",
        options: ["0", "1", "-2", "-1"],
        correct_answer: 2,
        explanation: "n goes 10, 7, 4, 1, -2 and the condition fails at -2.",
    },
    LoopChallenge {
        id: 3,
        prompt_code: "let mut sum = 0;\nfor i in 1..=4 {\n    sum += i;\n}",
        question: "What is sum after the loop?",
        options: ["6", "10", "4", "15"],
        correct_answer: 1,
        explanation: "The inclusive range adds 1 + 2 + 3 + 4 = 10.",
    },
    LoopChallenge {
        id: 4,
        prompt_code: "let mut i = 0;\nloop {\n    i += 1;\n    if i == 3 { break; }\n}",
        question: "What stops this loop?",
        options: [
            "The loop condition",
            "Nothing, it never stops",
            "The break when i reaches 3",
            "An overflow of i",
        ],
        correct_answer: 2,
        explanation: "`loop` has no condition; only the explicit break exits it.",
    },
    LoopChallenge {
        id: 5,
        prompt_code: "for i in 0..10 {\n    if i % 2 == 0 { continue; }\n    print(i);\n}",
        question: "Which values are printed?",
        options: [
            "Even numbers",
            "Odd numbers",
            "All numbers",
            "Nothing",
        ],
        correct_answer: 1,
        explanation: "`continue` skips the print for every even i.",
    },
    LoopChallenge {
        id: 6,
        prompt_code: "let mut count = 0;\nfor _ in 0..3 {\n    for _ in 0..2 {\n        count += 1;\n    }\n}",
        question: "What is count after both loops finish?",
        options: ["5", "3", "2", "6"],
        correct_answer: 3,
        explanation: "The inner loop runs twice for each of the three outer passes.",
    },
];

pub fn challenge(id: u32) -> Option<&'static LoopChallenge> {
    LOOP_CHALLENGES.iter().find(|c| c.id == id)
}
