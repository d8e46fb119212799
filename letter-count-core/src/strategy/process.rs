use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io;
use crate::model::corpus::Corpus;
use crate::model::frequency_table::FrequencyTable;
use crate::model::settings::Settings;
use super::chunk;

/// How to launch a worker process.
///
/// The program is started once per span with `args`, receives a
/// [`WorkerTask`] on stdin and must answer with a [`WorkerReply`] on
/// stdout, as [`serve`] does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerCommand {
	program: PathBuf,
	args: Vec<OsString>,
}

impl WorkerCommand {
	pub fn new<P: Into<PathBuf>>(program: P) -> Self {
		Self { program: program.into(), args: Vec::new() }
	}

	/// Re-invokes the running executable with `args`.
	pub fn current_exe<I, S>(args: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<OsString>,
	{
		Ok(Self::new(std::env::current_exe()?).args(args))
	}

	pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Self {
		self.args.push(arg.into());
		self
	}

	pub fn args<I, S>(mut self, args: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<OsString>,
	{
		self.args.extend(args.into_iter().map(Into::into));
		self
	}

	fn spawn(&self) -> std::io::Result<Child> {
		Command::new(&self.program)
			.args(&self.args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::inherit())
			.spawn()
	}
}

/// Work sent to a worker process: count `len` bytes of `path` from `offset`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WorkerTask {
	pub path: PathBuf,
	pub offset: u64,
	pub len: u64,
	pub chunk_size: usize,
}

/// Answer of a worker process.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WorkerReply {
	/// Bytes actually read; shorter than the task's `len` if the file was truncated.
	pub bytes_read: u64,
	pub table: FrequencyTable,
}

/// Counts the bytes described by `task`, reading one chunk at a time.
pub fn count_task(task: &WorkerTask) -> Result<WorkerReply> {
	if task.chunk_size == 0 {
		return Err(Error::InvalidSettings("chunk size must be at least 1".to_owned()));
	}
	let mut reader = io::open_at(&task.path, task.offset)?.take(task.len);
	let mut buffer = vec![0u8; task.chunk_size.min(task.len as usize)];
	let mut table = FrequencyTable::new();
	let mut bytes_read = 0;

	while bytes_read < task.len {
		let read = io::read_chunk(&mut reader, &mut buffer)?;
		if read == 0 {
			break;
		}
		table.record(&buffer[..read]);
		bytes_read += read as u64;
	}

	Ok(WorkerReply { bytes_read, table })
}

/// Worker side of the protocol: reads one task from `input`, counts it and
/// writes the reply to `output`.
pub fn serve<R: Read, W: Write>(mut input: R, mut output: W) -> Result<()> {
	let mut request = Vec::new();
	input.read_to_end(&mut request)?;
	let task: WorkerTask = postcard::from_bytes(&request)?;
	debug!("Worker {} counting bytes {}..{}", std::process::id(), task.offset, task.offset + task.len);

	let reply = count_task(&task)?;
	output.write_all(&postcard::to_stdvec(&reply)?)?;
	output.flush()?;
	Ok(())
}

/// Counts the corpus file with a fixed pool of worker processes.
///
/// # Errors
/// - `InvalidSettings` if no worker command is configured.
/// - `Worker` if a process cannot be started, exits unsuccessfully or
///   reports fewer bytes than it was assigned.
pub fn count(corpus: &Corpus, settings: &Settings) -> Result<FrequencyTable> {
	let worker = settings
		.worker
		.as_ref()
		.ok_or_else(|| Error::InvalidSettings("process strategy needs a worker command".to_owned()))?;
	count_file(corpus.path(), corpus.len(), settings.chunk_size(), settings.workers(), worker)
}

/// Spawns one worker per span of `path`, then collects and merges their tables.
///
/// All workers are started before any is awaited so they run concurrently.
pub fn count_file(
	path: &Path,
	len: u64,
	chunk_size: usize,
	workers: usize,
	worker: &WorkerCommand,
) -> Result<FrequencyTable> {
	let chunks = chunk::plan(len, chunk_size);
	let groups = chunk::assign(&chunks, workers);
	debug!("Process count: {} chunks over {} processes", chunks.len(), groups.len());

	let mut running = Vec::with_capacity(groups.len());
	for group in groups {
		let (offset, len) = chunk::span(group);
		let task = WorkerTask { path: path.to_path_buf(), offset, len, chunk_size };
		match start(worker, &task) {
			Ok(child) => running.push((task, child)),
			Err(error) => {
				abort(running);
				return Err(error);
			}
		}
	}

	let mut total = FrequencyTable::new();
	let mut running = running.into_iter();
	while let Some((task, child)) = running.next() {
		match collect(&task, child) {
			Ok(table) => total.merge(&table),
			Err(error) => {
				abort(running.collect());
				return Err(error);
			}
		}
	}
	Ok(total)
}

/// Starts a worker and hands it its task.
fn start(worker: &WorkerCommand, task: &WorkerTask) -> Result<Child> {
	let mut child = worker
		.spawn()
		.map_err(|e| Error::worker(task.offset, task.len, format!("cannot start {}: {e}", worker.program.display())))?;

	let request = postcard::to_stdvec(task)?;
	let sent = match child.stdin.take() {
		Some(mut stdin) => stdin.write_all(&request),
		None => Err(std::io::Error::other("stdin not captured")),
	};
	if let Err(e) = sent {
		abort(vec![(task.clone(), child)]);
		return Err(Error::worker(task.offset, task.len, format!("cannot send task: {e}")));
	}
	debug!("Started worker {} for bytes {}..{}", child.id(), task.offset, task.offset + task.len);
	Ok(child)
}

/// Waits for a worker and decodes its reply.
fn collect(task: &WorkerTask, child: Child) -> Result<FrequencyTable> {
	let output = child
		.wait_with_output()
		.map_err(|e| Error::worker(task.offset, task.len, format!("cannot wait for worker: {e}")))?;
	if !output.status.success() {
		return Err(Error::worker(task.offset, task.len, format!("worker exited with {}", output.status)));
	}

	let reply: WorkerReply = postcard::from_bytes(&output.stdout)
		.map_err(|e| Error::worker(task.offset, task.len, format!("invalid reply: {e}")))?;
	if reply.bytes_read != task.len {
		return Err(Error::worker(
			task.offset,
			task.len,
			format!("read {} of {} bytes", reply.bytes_read, task.len),
		));
	}
	Ok(reply.table)
}

/// Kills and reaps workers that will not be collected.
fn abort(running: Vec<(WorkerTask, Child)>) {
	for (task, mut child) in running {
		warn!("Stopping worker {} for bytes {}..{}", child.id(), task.offset, task.offset + task.len);
		let _ = child.kill();
		let _ = child.wait();
	}
}
