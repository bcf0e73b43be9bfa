/// Asserts that every listed cell type is present in the engine's tissue.
#[macro_export]
macro_rules! assert_types_present {
    ($engine:expr, $($cell:expr),+ $(,)?) => {
        let census = $engine.census();
        $(
            assert!(
                census.contains($cell),
                "{:?} missing at iteration {} (present: {:?})",
                $cell,
                $engine.iteration(),
                census.types_present
            );
        )+
    };
}

/// Asserts that both morphogen fields are finite and non-negative.
#[macro_export]
macro_rules! assert_finite_morphogens {
    ($engine:expr) => {
        let field = $engine.morphogens();
        assert!(field.is_finite(), "Morphogen field went non-finite");
        assert!(
            field.min_value() >= 0.0,
            "Morphogen field went negative: {}",
            field.min_value()
        );
    };
}

/// Asserts that the non-empty population stays within `[min, max]`.
#[macro_export]
macro_rules! assert_population_within {
    ($engine:expr, $min:expr, $max:expr) => {
        let population = $engine.census().population;
        assert!(
            population >= $min && population <= $max,
            "Population {} outside [{}, {}]",
            population,
            $min,
            $max
        );
    };
}
