use gatsp::io::{write_report, CSV_REPORT, IMAGE_DIR, TEXT_REPORT};
use gatsp::orchestrator::Problem;
use gatsp::{is_permutation, City, Config, Orchestrator};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let mut d = std::env::temp_dir();
    d.push(format!("gatsp-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&d);
    d
}

fn square() -> Vec<City> {
    vec![
        City::new(0, 0),
        City::new(0, 10),
        City::new(10, 10),
        City::new(10, 0),
    ]
}

#[test]
fn every_worker_finds_the_square_perimeter() {
    let config = Config::default()
        .num_workers(3)
        .generations(1000)
        .population_size(50)
        .seed(Some(2021));
    let report = Orchestrator::new(config)
        .run_problems(vec![Problem::new(0, square())])
        .unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.completed().count(), 3);
    for result in report.completed() {
        assert!((result.distance - 40.0).abs() < 1e-9);
        assert!(is_permutation(result.tour.order(), 4));
    }
}

#[test]
fn barrier_waits_for_all_pairs() {
    let config = Config::default()
        .num_problems(5)
        .num_cities(6)
        .num_workers(7)
        .generations(5)
        .population_size(6)
        .seed(Some(3));
    let report = Orchestrator::new(config).run().unwrap();
    assert_eq!(report.outcomes.len(), 35);
    assert_eq!(report.failures().count(), 0);

    let groups = report.by_problem();
    assert_eq!(groups.len(), 5);
    assert!(groups.values().all(|group| group.len() == 7));
}

#[test]
fn writes_reports_and_images() {
    let dir = scratch_dir("reports");
    let config = Config::default()
        .num_problems(2)
        .num_cities(10)
        .num_workers(3)
        .generations(20)
        .population_size(8)
        .canvas_width(64)
        .canvas_height(64)
        .node_size(2)
        .seed(Some(11))
        .output_dir(dir.clone());
    let report = Orchestrator::new(config.clone()).run().unwrap();
    write_report(&report, &config).unwrap();

    let csv = fs::read_to_string(dir.join(CSV_REPORT)).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("Thread Name,Num Generations"));
    let problems: Vec<_> = lines[1..]
        .iter()
        .map(|l| l.split(',').nth(5).unwrap().to_string())
        .collect();
    assert_eq!(problems, vec!["0", "0", "0", "1", "1", "1"]);

    let text = fs::read_to_string(dir.join(TEXT_REPORT)).unwrap();
    assert_eq!(text.matches("Thread Name: ").count(), 6);
    assert!(text.contains("Problem #1\nDistance: "));

    let images = fs::read_dir(dir.join(IMAGE_DIR)).unwrap().count();
    assert_eq!(images, 6);
    let png = fs::read(
        dir.join(IMAGE_DIR)
            .join("tour_thread_Thread-2_problem_1.png"),
    )
    .unwrap();
    assert_eq!(&png[1..4], b"PNG");

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unwritable_output_is_fatal() {
    let dir = scratch_dir("blocked");
    fs::create_dir_all(dir.parent().unwrap()).unwrap();
    // a regular file where the output directory should be
    fs::write(&dir, b"not a directory").unwrap();
    let config = Config::default()
        .num_problems(1)
        .num_cities(4)
        .num_workers(1)
        .generations(2)
        .population_size(2)
        .output_dir(dir.clone());
    let report = Orchestrator::new(config.clone()).run().unwrap();
    assert!(write_report(&report, &config).is_err());
    fs::remove_file(&dir).unwrap();
}
