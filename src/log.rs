use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use std::thread;

fn format(builder: &mut Builder) -> &mut Builder {
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] - {}",
            record.level(),
            thread::current().name().unwrap_or("unnamed"),
            record.args()
        )
    })
}

pub fn build_logger_for_level(level: LevelFilter) {
    let mut builder = Builder::from_default_env();
    format(&mut builder).filter(None, level).init();
}

pub fn build_logger() {
    let mut builder = Builder::from_default_env();
    format(&mut builder).init();
}
