#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }
}

pub fn is_complete<S: AsRef<str>>(answer: &[S], shuffled: &[S]) -> bool {
    answer.len() == shuffled.len()
}

/// `None` while the answer is still partial. Exact comparison after joining on
/// single spaces: case, spacing and punctuation all count.
pub fn evaluate<S: AsRef<str>>(answer: &[S], shuffled: &[S], canonical: &str) -> Option<Verdict> {
    if !is_complete(answer, shuffled) {
        return None;
    }
    let joined = answer.iter().map(AsRef::as_ref).collect::<Vec<&str>>().join(" ");
    Some(if joined == canonical {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn partial_answer_has_no_verdict() {
        let shuffled = words("mat the sat cat on the");
        assert_eq!(evaluate(&words("the cat"), &shuffled, "the cat sat on the mat"), None);
        assert!(!is_complete(&words("the cat"), &shuffled));
    }

    #[test]
    fn original_order_matches() {
        let canonical = "the cat sat on the mat";
        let shuffled = words("mat the sat cat on the");
        let answer = words(canonical);
        assert!(is_complete(&answer, &shuffled));
        assert_eq!(evaluate(&answer, &shuffled, canonical), Some(Verdict::Correct));
        // pure: asking twice gives the same answer
        assert_eq!(evaluate(&answer, &shuffled, canonical), Some(Verdict::Correct));
    }

    #[test]
    fn any_reordering_fails() {
        let canonical = "the cat sat on the mat";
        let shuffled = words(canonical);
        for answer in ["cat the sat on the mat", "the mat sat on the cat", "mat the on sat cat the"] {
            let verdict = evaluate(&words(answer), &shuffled, canonical);
            assert_eq!(verdict, Some(Verdict::Incorrect), "{answer}");
            assert_eq!(verdict, evaluate(&words(answer), &shuffled, canonical));
        }
    }

    #[test]
    fn comparison_is_case_and_punctuation_sensitive() {
        let canonical = "Where is the station?";
        let shuffled = words(canonical);
        assert_eq!(
            evaluate(&words("where is the Station?"), &shuffled, canonical),
            Some(Verdict::Incorrect)
        );
        assert_eq!(evaluate(&words(canonical), &shuffled, canonical), Some(Verdict::Correct));
    }

    #[test]
    fn swapping_identical_tokens_still_matches() {
        // both "the" buttons are interchangeable, so any order of them is the same text
        let canonical = "the cat sat on the mat";
        let shuffled = words("the the cat sat on mat");
        assert_eq!(evaluate(&words(canonical), &shuffled, canonical), Some(Verdict::Correct));
    }
}
