#[cfg(test)]
mod tests {

    use std::error::Error;
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use ron;
    use rs_wordle_search::*;

    #[test]
    fn word_stats_table_serde() -> Result<(), Box<dyn Error>> {
        let bank = WordBank::from_iterator(vec!["apple", "angle", "amble"])?;
        let table = WordStatsTable::compute(&bank);

        let ser = ron::to_string(&table);
        assert_matches!(ser, Ok(_));

        let deser = ron::from_str::<WordStatsTable>(&ser.unwrap())?;
        assert_eq!(deser, table);
        assert_eq!(deser.best_word(), table.best_word());
        Ok(())
    }

    #[test]
    fn deserialized_stats_drive_const_evaluator() -> Result<(), Box<dyn Error>> {
        let bank = WordBank::from_iterator(vec!["apple", "angle", "amble"])?;
        let table = WordStatsTable::compute(&bank);
        let deser = ron::from_str::<WordStatsTable>(&ron::to_string(&table)?)?;
        let state = GameState::new(GameConfig::default(), &bank);
        let config = AgentConfig {
            strategy: Strategy::Minimax,
            evaluator: EvaluatorKind::Const,
            ..AgentConfig::default()
        };

        let guess = create_agent(&config, Arc::new(table)).choose_guess(&state)?;
        let deser_guess = create_agent(&config, Arc::new(deser)).choose_guess(&state)?;

        assert_eq!(deser_guess, guess);
        Ok(())
    }

    #[test]
    fn feedback_serde() -> Result<(), Box<dyn Error>> {
        let feedback: Feedback = "g.y.g".parse()?;

        let ser = ron::to_string(&feedback)?;
        let deser = ron::from_str::<Feedback>(&ser)?;

        assert_eq!(deser, feedback);
        assert_eq!(deser.to_string(), "g.y.g");
        Ok(())
    }

    #[test]
    fn word_bank_serde() -> Result<(), Box<dyn Error>> {
        let bank = WordBank::from_iterator(vec!["worda", "wordb"])?;

        let ser = ron::to_string(&bank)?;
        let deser = ron::from_str::<WordBank>(&ser)?;

        assert_eq!(deser, bank);
        assert_eq!(deser.word_length(), 5);
        Ok(())
    }

    #[test]
    fn scoring_mode_serde() -> Result<(), Box<dyn Error>> {
        let ser = ron::to_string(&ScoringMode::Exact)?;

        assert_matches!(ron::from_str::<ScoringMode>(&ser), Ok(ScoringMode::Exact));
        Ok(())
    }
}
