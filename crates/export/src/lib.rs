//! Export helpers for CSV and JSON artifacts.

pub mod trace {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    pub const HEADER: &str = "elapsed_s,age,stage,star_scale,displayed_star_scale,lifespan,red_giant_end,current_mass,expansion_factor,inert_bodies,exploding";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row of the age trace.
    #[derive(Debug, Clone)]
    pub struct TraceRecord<'a> {
        pub elapsed_s: f64,
        pub age: f64,
        pub stage: &'a str,
        pub star_scale: f64,
        pub displayed_star_scale: f64,
        pub lifespan: f64,
        pub red_giant_end: f64,
        pub current_mass: f64,
        pub expansion_factor: f64,
        pub inert_bodies: usize,
        pub exploding: bool,
    }

    impl<'a> TraceRecord<'a> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.4},{:.4},{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{},{}",
                self.elapsed_s,
                self.age,
                self.stage,
                self.star_scale,
                self.displayed_star_scale,
                self.lifespan,
                self.red_giant_end,
                self.current_mass,
                self.expansion_factor,
                self.inert_bodies,
                if self.exploding { "true" } else { "false" },
            )
        }
    }
}

pub mod snapshot {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    /// Run metadata stored alongside a snapshot.
    #[derive(Debug, Clone, Serialize)]
    pub struct Metadata<'a> {
        pub config: &'a str,
        pub seed: u64,
        pub initial_mass: f64,
        pub initial_age: f64,
        pub frames: u64,
    }

    #[derive(Serialize)]
    struct SnapshotDocument<'a, S: Serialize, E: Serialize> {
        generated_utc: String,
        #[serde(flatten)]
        meta: &'a Metadata<'a>,
        events: &'a [E],
        snapshot: &'a S,
    }

    /// Write a pretty-printed JSON document holding metadata, the event log,
    /// and the final frame snapshot.
    pub fn write_snapshot<S, E>(
        output: &Path,
        meta: &Metadata<'_>,
        events: &[E],
        snapshot: &S,
    ) -> io::Result<()>
    where
        S: Serialize,
        E: Serialize,
    {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let document = SnapshotDocument {
            generated_utc: chrono::Utc::now().to_rfc3339(),
            meta,
            events,
            snapshot,
        };
        let mut writer = BufWriter::new(File::create(output)?);
        to_writer_pretty(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
