use sparc_instruments::error::InstrumentError;
use sparc_instruments::instruments::olbi::{
    self, BurnoutSurveyResponse, ResponseError, DISENGAGEMENT_QUESTIONS,
    EXHAUSTION_QUESTIONS,
};
use sparc_instruments::scoring::ScoreEntry;
use sparc_instruments::{get_instrument, Instrument};

fn responses(values: [i32; 12]) -> Vec<BurnoutSurveyResponse> {
    values
        .iter()
        .enumerate()
        .map(|(idx, v)| BurnoutSurveyResponse {
            question_number: idx as i32 + 1,
            response_value: *v,
        })
        .collect()
}

#[test]
fn reverse_scoring_is_an_involution() {
    for raw in 1..=4 {
        assert_eq!(olbi::reverse_score(olbi::reverse_score(raw)), raw);
    }
    assert_eq!(olbi::reverse_score(1), 4);
    assert_eq!(olbi::reverse_score(2), 3);
}

#[test]
fn subscales_partition_the_twelve_questions() {
    let mut all: Vec<u8> = EXHAUSTION_QUESTIONS
        .iter()
        .chain(DISENGAGEMENT_QUESTIONS.iter())
        .copied()
        .collect();
    all.sort_unstable();
    assert_eq!(all, (1..=12).collect::<Vec<u8>>());
}

#[test]
fn all_ones_scores_twelve_per_subscale() {
    let scores = olbi::score(&responses([1; 12])).unwrap();
    assert_eq!(scores.exhaustion_score, 12);
    assert_eq!(scores.disengagement_score, 12);
    assert_eq!(scores.exhaustion_average, 2.0);
    assert_eq!(scores.disengagement_average, 2.0);
    assert_eq!(scores.total_average, 2.0);
}

#[test]
fn subscale_sums_match_transformed_total_and_stay_in_bounds() {
    let sets = [
        [1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4],
        [4; 12],
        [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
        [3, 1, 4, 1, 4, 2, 1, 3, 2, 4, 4, 1],
    ];

    for set in sets {
        let input = responses(set);
        let scores = olbi::score(&input).unwrap();

        let transformed: i32 = input
            .iter()
            .map(|r| {
                if olbi::is_reverse_scored(r.question_number) {
                    olbi::reverse_score(r.response_value)
                } else {
                    r.response_value
                }
            })
            .sum();
        assert_eq!(
            (scores.exhaustion_score + scores.disengagement_score) as i32,
            transformed
        );
        assert!((6..=24).contains(&scores.exhaustion_score));
        assert!((6..=24).contains(&scores.disengagement_score));
    }
}

#[test]
fn averages_round_to_two_decimals() {
    // Exhaustion items 2,4,5,8,10,12 -> 1,1,(5-2)=3,1,(5-1)=4,1 = 11 -> 1.83
    let set = [1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1];
    let scores = olbi::score(&responses(set)).unwrap();
    assert_eq!(scores.exhaustion_score, 11);
    assert_eq!(scores.exhaustion_average, 1.83);
    assert_eq!(scores.disengagement_average, 2.0);
    assert_eq!(scores.total_average, 1.92);
}

#[test]
fn response_order_does_not_matter() {
    let mut shuffled = responses([1, 2, 3, 4, 4, 3, 2, 1, 1, 2, 3, 4]);
    let expected = olbi::score(&shuffled).unwrap();
    shuffled.reverse();
    assert_eq!(olbi::score(&shuffled).unwrap(), expected);
}

#[test]
fn wrong_count_is_reported_before_scoring() {
    let mut input = responses([2; 12]);
    input.pop();

    let err = olbi::score(&input).unwrap_err();
    let InstrumentError::InvalidResponses(errors) = err else {
        panic!("expected invalid responses");
    };
    assert!(errors.contains(&ResponseError::WrongCount {
        expected: 12,
        actual: 11
    }));
    assert!(errors.contains(&ResponseError::MissingQuestion { question_number: 12 }));
}

#[test]
fn out_of_range_and_duplicate_questions_are_reported() {
    let mut input = responses([2; 12]);
    input[0].response_value = 5;
    input[1].question_number = 3;
    input[11].question_number = 13;

    let errors = olbi::validate_responses(&input);
    assert!(errors.contains(&ResponseError::ValueOutOfRange {
        question_number: 1,
        value: 5
    }));
    assert!(errors.contains(&ResponseError::DuplicateQuestion { question_number: 3 }));
    assert!(errors.contains(&ResponseError::QuestionOutOfRange { question_number: 13 }));
    assert!(errors.contains(&ResponseError::MissingQuestion { question_number: 2 }));
    assert!(errors.contains(&ResponseError::MissingQuestion { question_number: 12 }));
}

#[test]
fn valid_set_has_no_errors() {
    assert!(olbi::validate_responses(&responses([3; 12])).is_empty());
}

#[test]
fn instrument_registry_exposes_olbi_domains() {
    let instrument = get_instrument("olbi").unwrap();
    let ids: Vec<_> = instrument.domains().iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["exhaustion", "disengagement", "overall"]);
    assert!(get_instrument("phq9").is_none());
}

#[test]
fn computed_scores_are_within_instrument_ranges() {
    let scores = olbi::score(&responses([4; 12])).unwrap();
    let instrument = olbi::Olbi;
    assert!(instrument.validate_scores(&scores.to_score_entries()).is_empty());

    let summary = instrument.summarize(&scores.to_score_entries());
    let lines: Vec<_> = summary.lines().collect();
    assert_eq!(lines[0], "Oldenburg Burnout Inventory");
    assert_eq!(lines[1], "Exhaustion");
    assert!(lines[2].trim_start().starts_with("Exhaustion Score"));
    assert!(lines[2].ends_with("(6-24)"));
    assert!(summary.contains("\nOverall\n"));
}

#[test]
fn summary_skips_domains_without_scores() {
    let entries = vec![ScoreEntry {
        subscale_id: "total_average".to_string(),
        value: 2.5,
    }];
    let summary = olbi::Olbi.summarize(&entries);
    assert!(!summary.contains("Exhaustion"));
    assert!(summary.contains("Overall"));
    assert!(summary.contains("2.5  (1-4)"));
}

#[test]
fn out_of_range_score_is_reported() {
    let entries = vec![
        ScoreEntry {
            subscale_id: "exhaustion_score".to_string(),
            value: 30.0,
        },
        ScoreEntry {
            subscale_id: "not_a_subscale".to_string(),
            value: -1.0,
        },
    ];
    let errors = olbi::Olbi.validate_scores(&entries);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].subscale_id, "exhaustion_score");
    assert_eq!(errors[0].message, "olbi exhaustion_score = 30 is outside 6..=24");
}
