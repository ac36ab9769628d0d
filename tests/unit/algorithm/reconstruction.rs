//! Tests for rendering waves back into colors

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use wavecollapse::algorithm::executor::{AlgorithmConfig, Model, ModelKind};
    use wavecollapse::algorithm::propagation::Propagator;
    use wavecollapse::algorithm::reconstruction::{
        render, render_blended, render_first_remaining, render_observed,
    };
    use wavecollapse::algorithm::wave::Wave;
    use wavecollapse::analysis::rules::CompatibilityRelation;
    use wavecollapse::io::configuration::UNKNOWN_COLOR;
    use wavecollapse::spatial::grid::{Color, Direction, Topology};

    const A: Color = [255, 0, 0, 255];
    const B: Color = [0, 255, 0, 255];
    const C: Color = [0, 0, 255, 255];
    const D: Color = [255, 255, 0, 255];
    const BLACK: Color = [0, 0, 0, 255];
    const WHITE: Color = [255, 255, 255, 255];

    fn overlapping(pattern_size: usize, width: usize, height: usize) -> AlgorithmConfig {
        AlgorithmConfig {
            model: ModelKind::Overlapping,
            pattern_size,
            symmetry: 1,
            width,
            height,
            ..AlgorithmConfig::default()
        }
    }

    fn symbol_starting_with(model: &Model, color: Color) -> usize {
        (0..model.symbol_count())
            .find(|&symbol| model.color_at(symbol, 0, 0) == Some(color))
            .unwrap()
    }

    // Tests observed symbols are read back with the last P-1 columns offset
    // Verified by reading every pixel at offset (0, 0)
    #[test]
    fn test_render_observed_reproduces_sample() {
        let sample = array![[A, B, C], [A, B, C]];
        let model = Model::from_sample(&sample, &overlapping(2, 3, 2)).unwrap();
        assert_eq!(model.symbol_count(), 2);

        let ab = symbol_starting_with(&model, A);
        let bc = symbol_starting_with(&model, B);
        let topology = Topology::new(3, 2, 2, false);
        let observed = vec![ab, bc, ab, ab, ab, ab];

        let image = render_observed(&model, &topology, &observed);
        assert_eq!(image, sample);
    }

    // Tests the adjacency fallback shows each cell's lowest remaining symbol
    // Verified by picking the last remaining symbol instead
    #[test]
    fn test_render_first_remaining() {
        let mut relation = CompatibilityRelation::new();
        relation.allow(0, 1, Direction::Right);
        relation.allow(1, 0, Direction::Right);
        let model = Model::from_rules(vec![A, B], vec![1.0, 1.0], &relation).unwrap();
        let topology = Topology::new(3, 1, 1, false);
        let mut wave = Wave::new(3, model.table(), model.statistics());
        let mut propagator = Propagator::new(3, 2);

        propagator.ban(&mut wave, model.statistics(), 1, 0);
        propagator.ban(&mut wave, model.statistics(), 2, 0);
        propagator.ban(&mut wave, model.statistics(), 2, 1);

        let image = render_first_remaining(&model, &wave, &topology);
        assert_eq!(image.dim(), (1, 3));
        assert_eq!(image[(0, 0)], A);
        assert_eq!(image[(0, 1)], B);
        assert_eq!(image[(0, 2)], UNKNOWN_COLOR);

        assert_eq!(render(&model, &wave, &topology, None), image);
    }

    // Tests blending averages every channel with integer division
    // Verified by rounding the average up
    #[test]
    fn test_render_blended_average() {
        let sample = array![[BLACK, WHITE]];
        let model = Model::from_sample(&sample, &overlapping(1, 2, 2)).unwrap();
        let topology = Topology::new(2, 2, 1, false);
        let wave = Wave::new(4, model.table(), model.statistics());

        let image = render_blended(&model, &wave, &topology);
        assert_eq!(image.dim(), (2, 2));
        assert!(image.iter().all(|&color| color == [127, 127, 127, 255]));
    }

    // Tests a pixel no pattern can cover gets the unknown color
    // Verified by dividing by a zero contributor count
    #[test]
    fn test_render_blended_empty_cell() {
        let sample = array![[BLACK, WHITE]];
        let model = Model::from_sample(&sample, &overlapping(1, 2, 1)).unwrap();
        let topology = Topology::new(2, 1, 1, false);
        let mut wave = Wave::new(2, model.table(), model.statistics());
        let mut propagator = Propagator::new(2, model.symbol_count());

        for symbol in 0..model.symbol_count() {
            propagator.ban(&mut wave, model.statistics(), 0, symbol);
        }
        let black = symbol_starting_with(&model, BLACK);
        let white = symbol_starting_with(&model, WHITE);
        propagator.ban(&mut wave, model.statistics(), 1, white);
        assert!(wave.is_possible(1, black));

        let image = render_blended(&model, &wave, &topology);
        assert_eq!(image[(0, 0)], UNKNOWN_COLOR);
        assert_eq!(image[(0, 1)], BLACK);
    }

    // Tests only anchors inside the grid contribute near its far edges
    // Verified by letting overhanging anchors contribute
    #[test]
    fn test_render_blended_single_pattern_corners() {
        let sample = array![[A, B], [C, D]];
        let model = Model::from_sample(&sample, &overlapping(2, 3, 3)).unwrap();
        assert_eq!(model.symbol_count(), 1);

        let topology = Topology::new(3, 3, 2, false);
        let wave = Wave::new(9, model.table(), model.statistics());
        let image: Array2<Color> = render_blended(&model, &wave, &topology);

        assert_eq!(image[(0, 0)], A);
        assert_eq!(image[(0, 2)], B);
        assert_eq!(image[(2, 0)], C);
        assert_eq!(image[(2, 2)], D);
    }

    // Tests an observed assignment takes precedence over the wave
    // Verified by dispatching on the model kind first
    #[test]
    fn test_render_prefers_observed() {
        let sample = array![[BLACK, WHITE]];
        let model = Model::from_sample(&sample, &overlapping(1, 2, 1)).unwrap();
        let topology = Topology::new(2, 1, 1, false);
        let wave = Wave::new(2, model.table(), model.statistics());
        let white = symbol_starting_with(&model, WHITE);

        let image = render(&model, &wave, &topology, Some(&[white, white]));
        assert_eq!(image, array![[WHITE, WHITE]]);
    }
}
