//! One split run: detect, decode, parse, split, encode, commit.

use crate::converter::Converter;
use crate::detect::InputFormat;
use crate::error::SplitError;
use crate::staging::StagingArea;
use chansplit::{split_channels, ChannelStream, SplitOptions, TrackLayout};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use splitconf::{SplitConfig, TrackMode};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Knobs for a run, resolved from configuration and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Name of the directory created next to the input.
    pub output_dir_name: String,
    /// Drop intermediate CSV files. `None` removes them only for MIDI input.
    pub remove_csv: Option<bool>,
    pub layout: TrackLayout,
    /// Channel encodes in flight at once.
    pub jobs: usize,
    pub fail_on_empty: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&SplitConfig::default())
    }
}

impl From<&SplitConfig> for RunOptions {
    fn from(config: &SplitConfig) -> Self {
        Self {
            output_dir_name: config.output.dir_name.clone(),
            remove_csv: config.output.remove_csv,
            layout: match config.output.tracks {
                TrackMode::Renumber => TrackLayout::Renumber,
                TrackMode::Collapse => TrackLayout::Collapse,
            },
            jobs: config.output.jobs,
            fail_on_empty: config.output.fail_on_empty,
        }
    }
}

/// Files written for one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelOutput {
    pub channel: u8,
    /// Records in the stream, shared globals included.
    pub records: usize,
    pub channel_events: usize,
    pub midi: PathBuf,
    pub csv: Option<PathBuf>,
}

/// Outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub input: PathBuf,
    pub format: InputFormat,
    pub layout: TrackLayout,
    pub output_dir: Option<PathBuf>,
    /// `<stem>.csv` written next to a decoded MIDI input.
    pub intermediate_csv: Option<PathBuf>,
    pub global_records: usize,
    pub channels: Vec<ChannelOutput>,
    /// True when the input had no channel events and nothing was written.
    pub empty: bool,
}

/// A channel whose files exist in staging but not yet in the output directory.
struct StagedChannel {
    channel: u8,
    records: usize,
    channel_events: usize,
    midi_name: String,
    csv_name: Option<String>,
}

pub struct Orchestrator<C> {
    converter: C,
    options: RunOptions,
}

impl<C: Converter> Orchestrator<C> {
    pub fn new(converter: C, options: RunOptions) -> Self {
        Self { converter, options }
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Split `input` into one MIDI file per channel.
    ///
    /// Outputs land in `<input dir>/<output_dir_name>`. Nothing is created
    /// unless every channel encodes successfully; the input file itself is
    /// never modified.
    pub async fn run(&self, input: &Path) -> Result<RunReport, SplitError> {
        let contents = match tokio::fs::read(input).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SplitError::InputNotFound(input.to_path_buf()));
            }
            Err(e) => return Err(SplitError::io("failed to read", input, e)),
        };

        let format = InputFormat::detect(input, &contents);
        let remove_csv = self.options.remove_csv.unwrap_or(format.is_midi());
        info!("splitting {} ({} input)", input.display(), format);

        let lines = match format {
            InputFormat::Midi => self.converter.decode(input).await?,
            InputFormat::Csv => text_lines(&contents),
        };
        debug!("{} lines of intermediate text", lines.len());

        let records = midicsv::parse_lines(&lines)?;
        let split = split_channels(
            &records,
            &SplitOptions {
                layout: self.options.layout,
            },
        );
        info!(
            "found {} channel(s) {:?} and {} global record(s)",
            split.len(),
            split.channels(),
            split.global_count()
        );

        let mut report = RunReport {
            input: input.to_path_buf(),
            format,
            layout: self.options.layout,
            output_dir: None,
            intermediate_csv: None,
            global_records: split.global_count(),
            channels: Vec::new(),
            empty: split.is_empty(),
        };

        if split.is_empty() {
            if self.options.fail_on_empty {
                return Err(SplitError::EmptyChannelSet(input.to_path_buf()));
            }
            warn!(
                "{} contains no channel events; nothing to write",
                input.display()
            );
            return Ok(report);
        }

        let output_dir = input
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.options.output_dir_name);
        let mut staging = StagingArea::for_target(&output_dir)?;

        let channels = self
            .write_channels(split.into_streams(), &mut staging, remove_csv)
            .await?;

        if format.is_midi() && !remove_csv {
            let csv_path = intermediate_path(input);
            let mut text = lines.join("\n");
            text.push('\n');
            tokio::fs::write(&csv_path, midicsv::encode_text(&text))
                .await
                .map_err(|e| SplitError::io("failed to write", &csv_path, e))?;
            info!("wrote {}", csv_path.display());
            report.intermediate_csv = Some(csv_path);
        }

        staging.finish();
        report.output_dir = Some(output_dir);
        report.channels = channels;
        Ok(report)
    }

    /// Stage every channel, then commit them all in ascending channel order.
    async fn write_channels(
        &self,
        streams: Vec<ChannelStream>,
        staging: &mut StagingArea,
        remove_csv: bool,
    ) -> Result<Vec<ChannelOutput>, SplitError> {
        let mut staged: Vec<StagedChannel> = {
            let staging: &StagingArea = staging;
            stream::iter(
                streams
                    .iter()
                    .map(|s| self.stage_channel(s, staging, remove_csv)),
            )
            .buffer_unordered(self.options.jobs.max(1))
            .try_collect()
            .await?
        };
        staged.sort_by_key(|s| s.channel);

        let mut outputs = Vec::with_capacity(staged.len());
        for channel in staged {
            let midi = staging.commit(&channel.midi_name).await?;
            info!("wrote {}", midi.display());
            let csv = match &channel.csv_name {
                Some(name) => {
                    let path = staging.commit(name).await?;
                    info!("wrote {}", path.display());
                    Some(path)
                }
                None => None,
            };
            outputs.push(ChannelOutput {
                channel: channel.channel,
                records: channel.records,
                channel_events: channel.channel_events,
                midi,
                csv,
            });
        }

        Ok(outputs)
    }

    async fn stage_channel(
        &self,
        stream: &ChannelStream,
        staging: &StagingArea,
        remove_csv: bool,
    ) -> Result<StagedChannel, SplitError> {
        let lines = stream.to_lines();
        let midi_name = format!("channel_{}.mid", stream.channel);

        let csv_name = if remove_csv {
            debug!("channel {}: intermediate CSV not kept", stream.channel);
            None
        } else {
            let name = format!("channel_{}.csv", stream.channel);
            let path = staging.path_for(&name);
            tokio::fs::write(&path, midicsv::encode_text(&stream.to_document()))
                .await
                .map_err(|e| SplitError::io("failed to write", &path, e))?;
            Some(name)
        };

        self.converter
            .encode(&lines, &staging.path_for(&midi_name))
            .await?;
        debug!("channel {}: encoded {} records", stream.channel, lines.len());

        Ok(StagedChannel {
            channel: stream.channel,
            records: stream.records.len(),
            channel_events: stream.channel_event_count(),
            midi_name,
            csv_name,
        })
    }
}

fn text_lines(contents: &[u8]) -> Vec<String> {
    midicsv::decode_bytes(contents)
        .lines()
        .map(str::to_string)
        .collect()
}

/// `<stem>.csv` beside the input, unless that would be the input itself.
fn intermediate_path(input: &Path) -> PathBuf {
    let path = input.with_extension("csv");
    if path == input {
        input.with_extension("decoded.csv")
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConvertError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory converter: "MIDI" files are the CSV text itself.
    #[derive(Default)]
    struct FakeConverter {
        decoded: Vec<String>,
        fail_on: Option<String>,
        stall: bool,
        encoded: Mutex<Vec<PathBuf>>,
    }

    impl FakeConverter {
        fn decoding(text: &str) -> Self {
            Self {
                decoded: text.lines().map(str::to_string).collect(),
                ..Self::default()
            }
        }

        fn failing_on(file_name: &str) -> Self {
            Self {
                fail_on: Some(file_name.to_string()),
                ..Self::default()
            }
        }

        fn stalling() -> Self {
            Self {
                stall: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Converter for FakeConverter {
        async fn decode(&self, _midi_path: &Path) -> Result<Vec<String>, ConvertError> {
            Ok(self.decoded.clone())
        }

        async fn encode(&self, lines: &[String], midi_path: &Path) -> Result<(), ConvertError> {
            if self.stall {
                std::future::pending::<()>().await;
            }
            let name = midi_path.file_name().unwrap().to_string_lossy().into_owned();
            if self.fail_on.as_deref() == Some(name.as_str()) {
                return Err(ConvertError::NonZeroExit {
                    tool: "csvmidi".to_string(),
                    code: Some(1),
                    stderr: "bad event".to_string(),
                });
            }
            let mut text = lines.join("\n");
            text.push('\n');
            std::fs::write(midi_path, midicsv::encode_text(&text)).unwrap();
            self.encoded.lock().unwrap().push(midi_path.to_path_buf());
            Ok(())
        }
    }

    const SCENARIO_A: &str = "0, 0, Header, 1, 2, 96
1, 0, Start_track
1, 0, Title_t, \"Duet, for two\"
1, 0, Tempo, 500000
1, 0, End_track
2, 0, Start_track
2, 0, Note_on_c, 0, 60, 90
2, 96, Note_off_c, 0, 60, 0
2, 96, Note_on_c, 1, 48, 80
2, 96, Note_on_c, 0, 62, 90
2, 192, Note_off_c, 0, 62, 0
2, 192, Note_off_c, 1, 48, 0
2, 192, Note_on_c, 0, 64, 90
2, 288, Note_off_c, 0, 64, 0
2, 288, Note_on_c, 1, 50, 80
2, 384, Note_off_c, 1, 50, 0
2, 384, End_track
0, 0, End_of_file
";

    const GLOBALS_ONLY: &str = "0, 0, Header, 1, 1, 96
1, 0, Start_track
1, 0, Tempo, 500000
1, 0, End_track
0, 0, End_of_file
";

    const SCENARIO_D: &str = "0, 0, Header, 1, 2, 96
1, 0, Start_track
1, 0, Tempo, 500000
1, 0, End_track
2, 0, Start_track
2, 0, Note_on_c, 5, 60, 90
2, 48, Note_on_c, 2, 64, 90
2, 96, Note_off_c, 5, 60, 0
2, 96, Note_off_c, 2, 64, 0
2, 96, End_track
0, 0, End_of_file
";

    fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// The lines of `source` that belong in channel `c`'s output.
    fn expected_for(source: &str, channel: &str) -> String {
        source
            .lines()
            .filter(|line| {
                let fields: Vec<&str> = line.split(", ").collect();
                !fields[2].ends_with("_c") || fields[3] == channel
            })
            .map(|line| format!("{}\n", line))
            .collect()
    }

    #[tokio::test]
    async fn test_csv_input_two_channels() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "duet.csv", SCENARIO_A);
        let orchestrator = Orchestrator::new(FakeConverter::default(), RunOptions::default());

        let report = orchestrator.run(&input).await.unwrap();

        let out = dir.path().join("split_channels");
        assert_eq!(report.format, InputFormat::Csv);
        assert_eq!(report.output_dir.as_deref(), Some(out.as_path()));
        assert!(!report.empty);
        assert_eq!(report.global_records, 8);
        assert_eq!(
            report.channels.iter().map(|c| c.channel).collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert_eq!(report.channels[0].channel_events, 6);
        assert_eq!(report.channels[1].channel_events, 4);
        assert_eq!(report.channels[0].records, 14);

        assert_eq!(
            entries(&out),
            vec!["channel_0.csv", "channel_0.mid", "channel_1.csv", "channel_1.mid"]
        );
        assert_eq!(read(&out.join("channel_0.mid")), expected_for(SCENARIO_A, "0"));
        assert_eq!(read(&out.join("channel_1.mid")), expected_for(SCENARIO_A, "1"));
        assert_eq!(read(&out.join("channel_1.csv")), expected_for(SCENARIO_A, "1"));

        // Input untouched, no staging left behind.
        assert_eq!(read(&input), SCENARIO_A);
        assert_eq!(entries(dir.path()), vec!["duet.csv", "split_channels"]);
    }

    #[tokio::test]
    async fn test_globals_only_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "tempo.csv", GLOBALS_ONLY);
        let orchestrator = Orchestrator::new(FakeConverter::default(), RunOptions::default());

        let report = orchestrator.run(&input).await.unwrap();

        assert!(report.empty);
        assert!(report.channels.is_empty());
        assert_eq!(report.output_dir, None);
        assert_eq!(entries(dir.path()), vec!["tempo.csv"]);
    }

    #[tokio::test]
    async fn test_globals_only_can_fail() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "tempo.csv", GLOBALS_ONLY);
        let options = RunOptions {
            fail_on_empty: true,
            ..RunOptions::default()
        };
        let orchestrator = Orchestrator::new(FakeConverter::default(), options);

        let err = orchestrator.run(&input).await.unwrap_err();
        assert!(matches!(err, SplitError::EmptyChannelSet(_)), "{err:?}");
        assert_eq!(entries(dir.path()), vec!["tempo.csv"]);
    }

    #[tokio::test]
    async fn test_missing_channel_is_malformed() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "broken.csv",
            "0, 0, Header, 1, 1, 96\n1, 0, Start_track\n1, 0, Note_on_c\n1, 0, End_track\n",
        );
        let orchestrator = Orchestrator::new(FakeConverter::default(), RunOptions::default());

        let err = orchestrator.run(&input).await.unwrap_err();
        match &err {
            SplitError::MalformedRecord(midicsv::Error::MalformedRecord { line, .. }) => {
                assert_eq!(*line, 3)
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(entries(dir.path()), vec!["broken.csv"]);
    }

    #[tokio::test]
    async fn test_channels_emitted_in_ascending_order() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "late.csv", SCENARIO_D);
        let options = RunOptions {
            remove_csv: Some(true),
            ..RunOptions::default()
        };
        let orchestrator = Orchestrator::new(FakeConverter::default(), options);

        let report = orchestrator.run(&input).await.unwrap();

        let out = dir.path().join("split_channels");
        assert_eq!(
            report.channels.iter().map(|c| c.channel).collect::<Vec<_>>(),
            vec![2, 5]
        );
        assert_eq!(report.channels[0].midi, out.join("channel_2.mid"));
        assert_eq!(report.channels[0].csv, None);
        assert_eq!(entries(&out), vec!["channel_2.mid", "channel_5.mid"]);
        assert_eq!(read(&out.join("channel_2.mid")), expected_for(SCENARIO_D, "2"));
    }

    #[tokio::test]
    async fn test_midi_input_removes_csv_by_default() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "duet.mid", "not really midi");
        let orchestrator = Orchestrator::new(FakeConverter::decoding(SCENARIO_A), RunOptions::default());

        let report = orchestrator.run(&input).await.unwrap();

        assert_eq!(report.format, InputFormat::Midi);
        assert_eq!(report.intermediate_csv, None);
        assert!(report.channels.iter().all(|c| c.csv.is_none()));
        assert_eq!(entries(dir.path()), vec!["duet.mid", "split_channels"]);
        assert_eq!(
            entries(&dir.path().join("split_channels")),
            vec!["channel_0.mid", "channel_1.mid"]
        );
    }

    #[tokio::test]
    async fn test_midi_input_keeping_csv() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "duet.mid", "not really midi");
        let options = RunOptions {
            remove_csv: Some(false),
            ..RunOptions::default()
        };
        let orchestrator = Orchestrator::new(FakeConverter::decoding(SCENARIO_A), options);

        let report = orchestrator.run(&input).await.unwrap();

        let intermediate = dir.path().join("duet.csv");
        assert_eq!(report.intermediate_csv.as_deref(), Some(intermediate.as_path()));
        assert_eq!(read(&intermediate), SCENARIO_A);
        assert_eq!(
            entries(&dir.path().join("split_channels")),
            vec!["channel_0.csv", "channel_0.mid", "channel_1.csv", "channel_1.mid"]
        );
    }

    #[tokio::test]
    async fn test_encode_failure_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "duet.csv", SCENARIO_A);
        let orchestrator =
            Orchestrator::new(FakeConverter::failing_on("channel_1.mid"), RunOptions::default());

        let err = orchestrator.run(&input).await.unwrap_err();

        assert!(matches!(err, SplitError::ExternalTool(_)), "{err:?}");
        assert_eq!(entries(dir.path()), vec!["duet.csv"]);
    }

    #[tokio::test]
    async fn test_existing_output_dir_survives_failure() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "duet.csv", SCENARIO_A);
        let out = dir.path().join("split_channels");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(out.join("notes.txt"), "keep me").unwrap();
        let orchestrator =
            Orchestrator::new(FakeConverter::failing_on("channel_0.mid"), RunOptions::default());

        orchestrator.run(&input).await.unwrap_err();

        assert_eq!(entries(&out), vec!["notes.txt"]);
    }

    #[tokio::test]
    async fn test_parallel_encodes_match_sequential() {
        let sequential = TempDir::new().unwrap();
        let parallel = TempDir::new().unwrap();
        let a = write_input(&sequential, "late.csv", SCENARIO_D);
        let b = write_input(&parallel, "late.csv", SCENARIO_D);

        let first = Orchestrator::new(FakeConverter::default(), RunOptions::default())
            .run(&a)
            .await
            .unwrap();
        let converter = FakeConverter::default();
        let options = RunOptions {
            jobs: 4,
            ..RunOptions::default()
        };
        let orchestrator = Orchestrator::new(converter, options);
        let second = orchestrator.run(&b).await.unwrap();

        assert_eq!(orchestrator.converter.encoded.lock().unwrap().len(), 2);
        assert_eq!(
            first.channels.iter().map(|c| c.channel).collect::<Vec<_>>(),
            second.channels.iter().map(|c| c.channel).collect::<Vec<_>>()
        );
        for name in ["channel_2.mid", "channel_5.mid"] {
            assert_eq!(
                read(&sequential.path().join("split_channels").join(name)),
                read(&parallel.path().join("split_channels").join(name))
            );
        }
    }

    #[tokio::test]
    async fn test_collapse_layout_rewrites_header() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "late.csv", SCENARIO_D);
        let options = RunOptions {
            layout: TrackLayout::Collapse,
            ..RunOptions::default()
        };
        let orchestrator = Orchestrator::new(FakeConverter::default(), options);

        let report = orchestrator.run(&input).await.unwrap();
        assert_eq!(report.layout, TrackLayout::Collapse);

        let text = read(&dir.path().join("split_channels").join("channel_5.mid"));
        let first = text.lines().next().unwrap();
        assert_eq!(first, "0, 0, Header, 0, 1, 96");
        assert!(text.lines().all(|l| l.starts_with("0, ") || l.starts_with("1, ")));
    }

    #[tokio::test]
    async fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let orchestrator = Orchestrator::new(FakeConverter::default(), RunOptions::default());

        let err = orchestrator
            .run(&dir.path().join("nope.mid"))
            .await
            .unwrap_err();
        assert!(matches!(err, SplitError::InputNotFound(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_latin1_text_is_copied_byte_for_byte() {
        let dir = TempDir::new().unwrap();
        let source: &[u8] = b"0, 0, Header, 0, 1, 96
1, 0, Start_track
1, 0, Lyric_t, \"caf\xE9\"
1, 0, Note_on_c, 0, 60, 90
1, 96, Note_off_c, 0, 60, 0
1, 96, End_track
0, 0, End_of_file
";
        let input = dir.path().join("lyric.csv");
        std::fs::write(&input, source).unwrap();
        let orchestrator = Orchestrator::new(FakeConverter::default(), RunOptions::default());

        orchestrator.run(&input).await.unwrap();

        let out = dir.path().join("split_channels");
        assert_eq!(std::fs::read(out.join("channel_0.mid")).unwrap(), source);
        assert_eq!(std::fs::read(out.join("channel_0.csv")).unwrap(), source);
    }

    #[tokio::test]
    async fn test_sniffed_midi_with_csv_name_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let mut smf = Vec::new();
        smf.extend_from_slice(b"MThd");
        smf.extend_from_slice(&[0, 0, 0, 6, 0, 0, 0, 1, 0, 96]);
        smf.extend_from_slice(b"MTrk");
        smf.extend_from_slice(&[0, 0, 0, 4, 0x00, 0xFF, 0x2F, 0x00]);
        let input = dir.path().join("song.csv");
        std::fs::write(&input, &smf).unwrap();

        let options = RunOptions {
            remove_csv: Some(false),
            ..RunOptions::default()
        };
        let orchestrator = Orchestrator::new(FakeConverter::decoding(SCENARIO_A), options);
        let report = orchestrator.run(&input).await.unwrap();

        assert_eq!(report.format, InputFormat::Midi);
        assert_eq!(std::fs::read(&input).unwrap(), smf);
        let decoded = dir.path().join("song.decoded.csv");
        assert_eq!(report.intermediate_csv.as_deref(), Some(decoded.as_path()));
        assert_eq!(read(&decoded), SCENARIO_A);
    }

    #[tokio::test]
    async fn test_failed_commit_rolls_back_earlier_channels() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "duet.csv", SCENARIO_A);
        let out = dir.path().join("split_channels");
        std::fs::create_dir_all(out.join("channel_1.mid")).unwrap();
        let orchestrator = Orchestrator::new(FakeConverter::default(), RunOptions::default());

        let err = orchestrator.run(&input).await.unwrap_err();

        assert!(matches!(err, SplitError::Io { .. }), "{err:?}");
        assert_eq!(entries(&out), vec!["channel_1.mid"]);
        assert_eq!(entries(dir.path()), vec!["duet.csv", "split_channels"]);
    }

    #[tokio::test]
    async fn test_cancelled_run_leaves_nothing_behind() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "duet.csv", SCENARIO_A);
        let orchestrator = Orchestrator::new(FakeConverter::stalling(), RunOptions::default());

        let outcome =
            tokio::time::timeout(std::time::Duration::from_millis(200), orchestrator.run(&input))
                .await;

        assert!(outcome.is_err(), "run should still be encoding");
        assert_eq!(entries(dir.path()), vec!["duet.csv"]);
    }

    #[test]
    fn test_intermediate_path_never_names_the_input() {
        assert_eq!(
            intermediate_path(Path::new("/music/song.mid")),
            PathBuf::from("/music/song.csv")
        );
        assert_eq!(
            intermediate_path(Path::new("/music/song.csv")),
            PathBuf::from("/music/song.decoded.csv")
        );
    }

    #[test]
    fn test_options_from_config() {
        let mut config = SplitConfig::default();
        config.output.tracks = TrackMode::Collapse;
        config.output.jobs = 3;
        config.output.remove_csv = Some(false);

        let options = RunOptions::from(&config);
        assert_eq!(options.layout, TrackLayout::Collapse);
        assert_eq!(options.jobs, 3);
        assert_eq!(options.remove_csv, Some(false));
        assert_eq!(options.output_dir_name, "split_channels");
    }
}
