//! Integration tests for the cine crates.
//!
//! This crate contains end-to-end tests that exercise the document model,
//! the generator and the analyzer together.

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use cine_analyze::{
        aggregate, analyze, analyze_all, discover, load_corpus, AnalyzerConfig, ColorTemperature, CorpusAnalyzer,
    };
    use cine_grade::{generate, generate_presets, GenerationParameters, Preset};
    use cine_lut::{grid_coord, Lut3D, LutError};
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn shifted(size: usize, shift: [f64; 3]) -> Lut3D {
        Lut3D::from_fn(size, |r, g, b| {
            [
                grid_coord(r, size) + shift[0],
                grid_coord(g, size) + shift[1],
                grid_coord(b, size) + shift[2],
            ]
        })
        .unwrap()
    }

    fn write_cube(path: &Path, lut: &Lut3D) {
        cine_lut::save(lut, path, "test").expect("Failed to write LUT");
    }

    /// save -> load keeps every value within the 6-decimal precision.
    #[test]
    fn test_cube_roundtrip_sizes() {
        let dir = tempdir().unwrap();
        for size in [2, 3, 17, 33] {
            let lut = generate(&GenerationParameters::default().with_size(size)).unwrap();
            let path = dir.path().join(format!("rt_{}.cube", size));

            cine_lut::save(&lut, &path, "Roundtrip").unwrap();
            let loaded = cine_lut::load(&path).unwrap();

            assert_eq!(loaded.size(), size);
            assert_eq!(loaded.title, "Roundtrip");
            assert!(loaded.max_abs_diff(&lut).unwrap() <= 1e-6, "size {}", size);
        }
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.cube");
        fs::write(&path, "LUT_3D_SIZE 2\n0 0 0\n1 1 1\n").unwrap();
        let err = cine_lut::load(&path).unwrap_err();
        assert!(matches!(err, LutError::ParseError(_)));

        let missing = cine_lut::load(dir.path().join("nope.cube")).unwrap_err();
        assert!(missing.is_parse_error());
    }

    #[test]
    fn test_identity_sampling() {
        let lut = Lut3D::identity(17);
        for i in 0..17 {
            let node = lut.get(i, 16 - i, i / 2);
            assert_eq!(lut.sample(node), node);
        }
        for i in 0..16 {
            let a = lut.get(i, 3, 7);
            let b = lut.get(i + 1, 3, 7);
            let mid = [(a[0] + b[0]) / 2.0, a[1], a[2]];
            let out = lut.sample(mid);
            for c in 0..3 {
                assert_abs_diff_eq!(out[c], (a[c] + b[c]) / 2.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_sample_after_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("grade.cube");
        let lut = generate(&Preset::Classic.params().with_size(17)).unwrap();
        write_cube(&path, &lut);

        let loaded = cine_lut::load(&path).unwrap();
        let (r, g, b) = cine_lut::sample(&loaded, 0.31, 0.52, 0.77);
        let expected = lut.sample([0.31, 0.52, 0.77]);
        assert_abs_diff_eq!(r, expected[0], epsilon = 1e-6);
        assert_abs_diff_eq!(g, expected[1], epsilon = 1e-6);
        assert_abs_diff_eq!(b, expected[2], epsilon = 1e-6);
    }

    #[test]
    fn test_generator_determinism() {
        let p = GenerationParameters::default();
        let a = generate(&p).unwrap();
        let b = generate(&p).unwrap();
        assert!(a.max_abs_diff(&b).unwrap() <= 1e-9);
    }

    #[test]
    fn test_noop_generation_is_identity() {
        let lut = generate(&GenerationParameters::neutral(17)).unwrap();
        let identity = Lut3D::identity(17);
        for (out, ident) in lut.data().iter().zip(identity.data()) {
            assert_eq!(out, ident);
        }
    }

    #[test]
    fn test_noop_analysis() {
        let lut = generate(&GenerationParameters::neutral(17)).unwrap();
        let result = analyze(&lut, "noop.cube", &AnalyzerConfig::default());
        for c in 0..3 {
            assert_abs_diff_eq!(result.channel(c).mean_shift, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(result.channel(c).std, 0.0, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(result.saturation_boost, 1.0, epsilon = 1e-12);
        assert_eq!(result.color_temperature, ColorTemperature::Neutral);
    }

    #[test]
    fn test_contrast_metric_is_monotonic() {
        let config = AnalyzerConfig::default();
        let metrics: Vec<f64> = [0.5, 0.8, 1.0, 1.2, 1.5, 2.0]
            .iter()
            .map(|&contrast| {
                let p = GenerationParameters { contrast, ..GenerationParameters::neutral(17) };
                analyze(&generate(&p).unwrap(), "c", &config).contrast
            })
            .collect();
        for pair in metrics.windows(2) {
            assert!(pair[1] > pair[0], "{:?}", metrics);
        }
    }

    #[test]
    fn test_high_contrast_is_clamped() {
        let p = GenerationParameters { contrast: 5.0, ..GenerationParameters::neutral(17) };
        let lut = generate(&p).unwrap();
        assert!(lut.data().iter().flatten().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(lut.get(0, 0, 0), [0.0, 0.0, 0.0]);
        assert_eq!(lut.get(16, 16, 16), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_aggregate_matches_hand_computed() {
        let config = AnalyzerConfig::default();
        let luts = [
            shifted(5, [0.1, 0.0, -0.02]),
            shifted(5, [-0.05, 0.03, 0.04]),
            shifted(5, [0.02, -0.06, 0.07]),
        ];
        let results: Vec<_> = luts.iter().map(|l| analyze(l, "s", &config)).collect();
        let agg = aggregate(&results).unwrap();

        assert_eq!(agg.total_luts_analyzed, 3);
        assert_abs_diff_eq!(agg.r_shift.mean, 0.023333333333333334, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.r_shift.std, 0.061282587702834124, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.r_shift.min, -0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.r_shift.max, 0.1, epsilon = 1e-12);

        assert_abs_diff_eq!(agg.g_shift.mean, -0.01, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.g_shift.std, 0.03741657386773941, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.g_shift.min, -0.06, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.g_shift.max, 0.03, epsilon = 1e-12);

        assert_abs_diff_eq!(agg.b_shift.mean, 0.03, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.b_shift.std, 0.03741657386773942, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.b_shift.min, -0.02, epsilon = 1e-12);
        assert_abs_diff_eq!(agg.b_shift.max, 0.07, epsilon = 1e-12);

        assert_eq!(agg.color_temp_distribution.warm, 1);
        assert_eq!(agg.color_temp_distribution.cool, 2);
        assert_eq!(agg.color_temp_distribution.neutral, 0);

        let mut reversed = results.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed).unwrap(), agg);
    }

    /// Builds a small LUT library:
    ///
    /// ```text
    /// root/
    ///   Film Looks/  a_good.cube  b_broken.cube  nested/c_good.CUBE  notes.txt
    ///   CINEMA pack/ warm.cube
    ///   vlog/        ignored.cube
    ///   film.txt
    /// ```
    fn build_library(root: &Path) {
        let film = root.join("Film Looks");
        fs::create_dir_all(film.join("nested")).unwrap();
        write_cube(&film.join("a_good.cube"), &Lut3D::identity(5));
        fs::write(film.join("b_broken.cube"), "LUT_3D_SIZE 2\n0 0 zero\n").unwrap();
        write_cube(&film.join("nested").join("c_good.CUBE"), &shifted(3, [0.0, 0.0, 0.1]));
        fs::write(film.join("notes.txt"), "not a lut").unwrap();

        let cinema = root.join("CINEMA pack");
        fs::create_dir_all(&cinema).unwrap();
        write_cube(&cinema.join("warm.cube"), &shifted(5, [0.08, 0.0, -0.02]));

        let vlog = root.join("vlog");
        fs::create_dir_all(&vlog).unwrap();
        write_cube(&vlog.join("ignored.cube"), &Lut3D::identity(2));

        fs::write(root.join("film.txt"), "a file, not a folder").unwrap();
    }

    #[test]
    fn test_discovery_is_case_insensitive() {
        let dir = tempdir().unwrap();
        build_library(dir.path());
        let found = discover(dir.path(), &["film", "cine"]).unwrap();
        assert_eq!(found, vec!["CINEMA pack".to_string(), "Film Looks".to_string()]);
    }

    #[test]
    fn test_corpus_loading_skips_broken_files() {
        let dir = tempdir().unwrap();
        build_library(dir.path());
        let folders = vec!["Film Looks".to_string(), "CINEMA pack".to_string(), "missing".to_string()];

        // cap 2: a_good + b_broken are taken, b_broken is skipped
        let capped = load_corpus(dir.path(), &folders, 2, "cube");
        let names: Vec<String> = capped.iter().map(|l| l.filename()).collect();
        assert_eq!(names, vec!["a_good.cube", "warm.cube"]);

        let all = load_corpus(dir.path(), &folders, 10, "cube");
        let names: Vec<String> = all.iter().map(|l| l.filename()).collect();
        assert_eq!(names, vec!["a_good.cube", "c_good.CUBE", "warm.cube"]);

        let results = analyze_all(&all, &AnalyzerConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].filename, "a_good.cube");
        assert_eq!(results[2].color_temperature, ColorTemperature::Warm);
    }

    #[test]
    fn test_lut_files_sort_by_path_components() {
        let dir = tempdir().unwrap();
        let pack = dir.path().join("film pack");
        fs::create_dir_all(pack.join("a")).unwrap();
        write_cube(&pack.join("a.cube"), &Lut3D::identity(2));
        write_cube(&pack.join("a").join("x.cube"), &shifted(2, [0.1, 0.0, 0.0]));

        let files = cine_analyze::corpus::collect_lut_files(&pack, "cube");
        assert_eq!(files, vec![pack.join("a").join("x.cube"), pack.join("a.cube")]);

        let capped = load_corpus(dir.path(), &["film pack"], 1, "cube");
        let names: Vec<String> = capped.iter().map(|l| l.filename()).collect();
        assert_eq!(names, vec!["x.cube"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_folders_are_followed() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let store = dir.path().join("store");
        let luts = store.join("looks");
        fs::create_dir_all(&luts).unwrap();
        write_cube(&luts.join("grade.cube"), &Lut3D::identity(3));

        let root = dir.path().join("root");
        fs::create_dir_all(&root).unwrap();
        symlink(&luts, root.join("Film Link")).unwrap();
        let linked = root.join("Cinema Real");
        fs::create_dir_all(&linked).unwrap();
        symlink(luts.join("grade.cube"), linked.join("linked.cube")).unwrap();

        let found = discover(&root, &["film", "cinema"]).unwrap();
        assert_eq!(found, vec!["Cinema Real".to_string(), "Film Link".to_string()]);

        let loaded = load_corpus(&root, &found, 5, "cube");
        let names: Vec<String> = loaded.iter().map(|l| l.filename()).collect();
        assert_eq!(names, vec!["linked.cube", "grade.cube"]);
    }

    #[test]
    fn test_bom_prefixed_file_loads_in_corpus() {
        let dir = tempdir().unwrap();
        let film = dir.path().join("film");
        fs::create_dir_all(&film).unwrap();

        let mut text = Vec::new();
        cine_lut::write_to(&mut text, &Lut3D::identity(2), "Bom").unwrap();
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(&text);
        fs::write(film.join("bom.cube"), bytes).unwrap();

        let loaded = load_corpus(dir.path(), &["film"], 5, "cube");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].lut.title, "Bom");
    }

    #[test]
    fn test_corpus_analyzer_report() {
        let dir = tempdir().unwrap();
        build_library(dir.path());

        let analyzer = CorpusAnalyzer::new(dir.path(), AnalyzerConfig::default());
        let report = analyzer.run().unwrap();
        assert_eq!(report.folders.len(), 2);
        assert_eq!(report.aggregate.total_luts_analyzed, 3);
        assert_eq!(report.results.len(), 3);

        let json_path = dir.path().join("cinematic_analysis.json");
        report.aggregate.write_json(&json_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value["total_luts_analyzed"], 3);
        assert_eq!(value["color_temp_distribution"]["warm"], 1);
        assert!(value["contrast"]["std"].is_number());
    }

    #[test]
    fn test_corpus_analyzer_empty() {
        let dir = tempdir().unwrap();
        let analyzer = CorpusAnalyzer::new(dir.path(), AnalyzerConfig::default());
        assert!(matches!(analyzer.run(), Err(cine_analyze::AnalyzeError::EmptyCorpus)));
    }

    #[test]
    fn test_presets_written_and_characterized() {
        let dir = tempdir().unwrap();
        let paths = generate_presets(dir.path().join("out")).unwrap();
        assert_eq!(paths.len(), 4);

        let config = AnalyzerConfig::default();
        for (preset, path) in Preset::ALL.iter().zip(&paths) {
            assert!(path.ends_with(format!("{}.cube", preset.file_stem())));
            let lut = cine_lut::load(path).unwrap();
            assert_eq!(lut.title, preset.title());
            assert_eq!(lut.size(), 33);

            let result = analyze(&lut, "p", &config);
            // every preset rolls highlights off below white
            assert!(result.highlight_roll < 1.0, "{:?}", preset);
            assert!(result.highlight_roll > 0.5, "{:?}", preset);
        }
    }
}
