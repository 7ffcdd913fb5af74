use crate::config::Config;
use crate::error::Result;
use crate::orchestrator::{Report, RunOutcome, RunResult};
use crate::render::TourRenderer;
#[cfg(feature = "log")]
use log::info;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TEXT_REPORT: &str = "results.txt";
pub const CSV_REPORT: &str = "results.csv";
pub const IMAGE_DIR: &str = "images";

pub const CSV_HEADER: [&str; 8] = [
    "Thread Name",
    "Num Generations",
    "Population Size",
    "Mutation Rate",
    "Crossover Rate",
    "Problem Num",
    "Distance",
    "Elapsed Time",
];

/// Human readable report, one block per run.
pub struct TextReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_outcome(&mut self, outcome: &RunOutcome) -> io::Result<()> {
        match outcome {
            RunOutcome::Completed(result) => write!(
                self.writer,
                "Thread Name: {}\nGenetic Parameters: numGenerations={} populationSize={} mutationRate={:.6} crossoverRate={:.6}\nProblem #{}\nDistance: {:.6}\nTime taken: {:?}\n\n",
                result.worker,
                result.generations,
                result.population_size,
                result.mutation_rate,
                result.crossover_rate,
                result.problem,
                result.distance,
                result.elapsed
            ),
            RunOutcome::Failed(failure) => write!(
                self.writer,
                "Thread Name: {}\nProblem #{}\nFailed: {}\n\n",
                failure.worker, failure.problem, failure.message
            ),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Tabular report. The header is written on construction.
pub struct CsvReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> CsvReportWriter<W> {
    pub fn new(writer: W) -> io::Result<Self> {
        let mut csv = Self { writer };
        csv.write_record(&CSV_HEADER[..])?;
        Ok(csv)
    }

    fn write_record<S: AsRef<str>>(&mut self, record: &[S]) -> io::Result<()> {
        let line: Vec<String> = record.iter().map(|f| csv_field(f.as_ref())).collect();
        writeln!(self.writer, "{}", line.join(","))
    }

    pub fn write_result(&mut self, result: &RunResult) -> io::Result<()> {
        let record = [
            result.worker.clone(),
            result.generations.to_string(),
            result.population_size.to_string(),
            format!("{:.6}", result.mutation_rate),
            format!("{:.6}", result.crossover_rate),
            result.problem.to_string(),
            format!("{:.6}", result.distance),
            format!("{:?}", result.elapsed),
        ];
        self.write_record(&record[..])
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub fn image_path(dir: &Path, worker: &str, problem: usize) -> PathBuf {
    dir.join(IMAGE_DIR)
        .join(format!("tour_thread_{}_problem_{}.png", worker, problem))
}

/// Writes the text report, the CSV report and one image per completed run into
/// `config.output_dir`. Results are grouped by problem index. Any failure to
/// create or write a file aborts the whole output.
pub fn write_report(report: &Report, config: &Config) -> Result<()> {
    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir.join(IMAGE_DIR))?;

    let mut text = TextReportWriter::new(BufWriter::new(File::create(dir.join(TEXT_REPORT))?));
    let mut csv = CsvReportWriter::new(BufWriter::new(File::create(dir.join(CSV_REPORT))?))?;
    let renderer = TourRenderer::from_config(config);

    let groups = report.by_problem();
    let mut problems: Vec<_> = groups.keys().copied().collect();
    problems.sort_unstable();
    for problem in problems {
        let cities = report
            .problems
            .iter()
            .find(|p| p.index == problem)
            .map(|p| &p.cities[..]);
        for outcome in &groups[&problem] {
            text.write_outcome(outcome)?;
            if let RunOutcome::Completed(result) = outcome {
                csv.write_result(result)?;
                if let Some(cities) = cities {
                    renderer.render_to_file(
                        &result.tour,
                        cities,
                        &image_path(dir, &result.worker, problem),
                    )?;
                }
            }
        }
    }
    text.flush()?;
    csv.flush()?;

    #[cfg(feature = "log")]
    info!(
        "wrote {} results to {}",
        report.outcomes.len(),
        dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::geometry::City;
    use crate::io::{csv_field, image_path, CsvReportWriter, TextReportWriter};
    use crate::orchestrator::{RunFailure, RunOutcome, RunResult};
    use crate::tour::Tour;
    use std::path::Path;
    use std::time::Duration;

    fn result() -> RunResult {
        let cities = vec![City::new(0, 0), City::new(3, 4)];
        let tour = Tour::from_order(vec![0, 1], &cities);
        RunResult {
            worker: "Thread-2".to_string(),
            generations: 100000,
            population_size: 100,
            mutation_rate: 0.05,
            crossover_rate: 0.7,
            problem: 3,
            distance: tour.distance(),
            elapsed: Duration::from_millis(1500),
            tour,
        }
    }

    #[test]
    fn text_block() {
        let mut writer = TextReportWriter::new(Vec::new());
        writer
            .write_outcome(&RunOutcome::Completed(result()))
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            text,
            "Thread Name: Thread-2\nGenetic Parameters: numGenerations=100000 populationSize=100 mutationRate=0.050000 crossoverRate=0.700000\nProblem #3\nDistance: 10.000000\nTime taken: 1.5s\n\n"
        );
    }

    #[test]
    fn failure_block() {
        let mut writer = TextReportWriter::new(Vec::new());
        writer
            .write_outcome(&RunOutcome::Failed(RunFailure {
                worker: "Thread-1".to_string(),
                problem: 0,
                message: "EmptyCitySet: a tour needs at least one city".to_string(),
            }))
            .unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.starts_with("Thread Name: Thread-1\nProblem #0\nFailed: EmptyCitySet"));
    }

    #[test]
    fn csv_header_and_row() {
        let mut writer = CsvReportWriter::new(Vec::new()).unwrap();
        writer.write_result(&result()).unwrap();
        let csv = String::from_utf8(writer.into_inner()).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "Thread Name,Num Generations,Population Size,Mutation Rate,Crossover Rate,Problem Num,Distance,Elapsed Time"
        );
        assert_eq!(
            lines[1],
            "Thread-2,100000,100,0.050000,0.700000,3,10.000000,1.5s"
        );
    }

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn image_naming() {
        assert_eq!(
            image_path(Path::new("out"), "Thread-4", 2),
            Path::new("out/images/tour_thread_Thread-4_problem_2.png")
        );
    }
}
