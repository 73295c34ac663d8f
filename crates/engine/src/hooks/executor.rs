//! Hook execution engine
//!
//! Runs every script of one hook group, one after another, and stops at the
//! first script that exits non-zero.

use super::loader::HookLoader;
use hookah_config::Layout;
use hookah_core::{Error, HookName, Result, System};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Environment variable holding the hook name while scripts run
pub const HOOK_ENV: &str = "HOOKAH_HOOK";

/// Everything needed to start one script
#[derive(Debug, Clone)]
pub struct ScriptInvocation<'a> {
    /// Hook being run
    pub hook: HookName,
    /// Script file inside the group directory
    pub script: &'a Path,
    /// Program to start (the script itself or its interpreter)
    ///
    /// Bare names such as `python3` are looked up on `PATH`.
    pub program: OsString,
    /// Interpreter arguments, the script path if interpreted, then git's arguments
    pub args: Vec<OsString>,
    /// Working directory (the repository root)
    pub working_dir: &'a Path,
    /// Bytes to feed on stdin; `None` inherits the parent's stdin
    pub stdin: Option<&'a [u8]>,
}

/// Starts a script and waits for its exit code
pub trait ScriptExecutor {
    /// Run to completion and return the exit code
    fn execute(&self, invocation: &ScriptInvocation<'_>) -> Result<i32>;
}

/// Implement ScriptExecutor for closures
impl<F> ScriptExecutor for F
where
    F: Fn(&ScriptInvocation<'_>) -> Result<i32>,
{
    fn execute(&self, invocation: &ScriptInvocation<'_>) -> Result<i32> {
        self(invocation)
    }
}

/// Runs scripts as child processes
///
/// stdout and stderr are inherited so git shows script output as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ScriptExecutor for ProcessExecutor {
    #[tracing::instrument(skip(self, invocation), fields(script = %invocation.script.display()))]
    fn execute(&self, invocation: &ScriptInvocation<'_>) -> Result<i32> {
        tracing::debug!(
            "Executing: {:?} {:?}",
            invocation.program,
            invocation.args
        );

        let mut expression = duct::cmd(invocation.program.as_os_str(), &invocation.args)
            .dir(invocation.working_dir)
            .env(HOOK_ENV, invocation.hook.as_str())
            .unchecked();

        if let Some(input) = invocation.stdin {
            expression = expression.stdin_bytes(input.to_vec());
        }

        let output = expression.run().map_err(|e| Error::ScriptSpawn {
            path: invocation.script.to_path_buf(),
            source: e,
        })?;

        Ok(exit_code(output.status))
    }
}

/// Map an exit status to a shell-style code
fn exit_code(status: std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// The script that stopped a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFailure {
    /// Script path
    pub script: PathBuf,
    /// Its non-zero exit code
    pub code: i32,
}

/// Outcome of [`HookRunner::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Hook that was run
    pub hook: HookName,
    /// Scripts started, in order (the failing one included)
    pub executed: Vec<PathBuf>,
    /// First failing script, if any
    pub failure: Option<ScriptFailure>,
}

impl RunReport {
    /// Exit code to hand back to git
    pub fn exit_code(&self) -> i32 {
        self.failure.as_ref().map_or(0, |f| f.code)
    }

    /// Whether every script succeeded
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Hook execution runner
///
/// # Examples
///
/// ```ignore
/// let report = HookRunner::new(&system, &layout).run("pre-commit", &args, None)?;
/// std::process::exit(report.exit_code());
///
/// // Swap the process layer out, e.g. in tests
/// let runner = HookRunner::new(&system, &layout)
///     .with_executor(|_: &ScriptInvocation<'_>| -> Result<i32> { Ok(0) });
/// ```
pub struct HookRunner<'a, E = ProcessExecutor>
where
    E: ScriptExecutor,
{
    system: &'a dyn System,
    layout: &'a Layout,
    executor: E,
}

impl<'a> HookRunner<'a, ProcessExecutor> {
    /// Create a runner that starts real processes
    pub fn new(system: &'a dyn System, layout: &'a Layout) -> Self {
        Self {
            system,
            layout,
            executor: ProcessExecutor,
        }
    }
}

impl<'a, E> HookRunner<'a, E>
where
    E: ScriptExecutor,
{
    /// Replace the executor
    pub fn with_executor<F>(self, executor: F) -> HookRunner<'a, F>
    where
        F: ScriptExecutor,
    {
        HookRunner {
            system: self.system,
            layout: self.layout,
            executor,
        }
    }

    /// Run every script of `hook`
    ///
    /// A hook with no group directory, or an empty one, succeeds without
    /// starting anything. Stops at the first non-zero exit code; the
    /// remaining scripts are not started.
    #[tracing::instrument(skip_all, fields(hook = %hook))]
    pub fn run(&self, hook: &str, args: &[OsString], stdin: Option<&[u8]>) -> Result<RunReport> {
        let hook = HookName::parse(hook)?;
        let scripts = HookLoader::new(self.system, self.layout).scripts(hook)?;

        let mut report = RunReport {
            hook,
            executed: Vec::with_capacity(scripts.len()),
            failure: None,
        };

        if scripts.is_empty() {
            tracing::debug!("No scripts in hook group");
            return Ok(report);
        }

        tracing::debug!(script_count = scripts.len(), "Running hook group");

        for script in scripts {
            let (program, mut command_args) = self.resolve_command(&script)?;
            command_args.extend(args.iter().cloned());

            let invocation = ScriptInvocation {
                hook,
                script: &script,
                program,
                args: command_args,
                working_dir: self.layout.root(),
                stdin,
            };

            let span = tracing::info_span!("script", name = %display_name(&script));
            let _guard = span.enter();

            let start = std::time::Instant::now();
            let code = self.executor.execute(&invocation)?;
            let elapsed = start.elapsed();
            report.executed.push(script.clone());

            if code != 0 {
                tracing::debug!(elapsed_ms = elapsed.as_millis(), code, "Hook script failed");
                report.failure = Some(ScriptFailure { script, code });
                return Ok(report);
            }

            tracing::debug!(elapsed_ms = elapsed.as_millis(), "Hook script succeeded");
        }

        Ok(report)
    }

    /// Decide how to start a script
    ///
    /// Executable files run directly. Anything else goes through its shebang
    /// interpreter, or one inferred from the extension.
    fn resolve_command(&self, script: &Path) -> Result<(OsString, Vec<OsString>)> {
        if self.system.metadata(script)?.is_executable() {
            return Ok((script.as_os_str().to_os_string(), Vec::new()));
        }

        let content = self.system.read_file(script)?;
        let (interpreter, mut args) = match parse_shebang(&content) {
            Some(shebang) => shebang?,
            None => (OsString::from(infer_interpreter(script)?), Vec::new()),
        };
        args.push(script.as_os_str().to_os_string());

        tracing::debug!("Using interpreter: {:?} {:?}", interpreter, args);
        Ok((interpreter, args))
    }
}

fn display_name(script: &Path) -> String {
    script
        .file_name()
        .map_or_else(|| script.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Parse the shebang line of a script
///
/// Returns `None` when there is no shebang.
///
/// # Examples
///
/// - `#!/bin/bash` → ("/bin/bash", [])
/// - `#!/usr/bin/env python3` → ("python3", [])
/// - `#!/bin/bash -e` → ("/bin/bash", ["-e"])
fn parse_shebang(content: &[u8]) -> Option<Result<(OsString, Vec<OsString>)>> {
    let first_line = content.split(|&b| b == b'\n').next()?;
    let shebang = first_line.strip_prefix(b"#!")?;
    let shebang = String::from_utf8_lossy(shebang);
    let parts: Vec<&str> = shebang.split_whitespace().collect();

    let Some((&program, rest)) = parts.split_first() else {
        return Some(Err(Error::Message(format!(
            "Empty shebang: {}",
            shebang.trim()
        ))));
    };

    // Handle "#!/usr/bin/env interpreter"
    if program == "/usr/bin/env" || program == "/bin/env" {
        let Some((&interpreter, env_args)) = rest.split_first() else {
            return Some(Err(Error::Message(format!(
                "Invalid env shebang: #!{}",
                shebang.trim()
            ))));
        };
        return Some(Ok((OsString::from(interpreter), to_os_strings(env_args))));
    }

    Some(Ok((OsString::from(program), to_os_strings(rest))))
}

fn to_os_strings(parts: &[&str]) -> Vec<OsString> {
    parts.iter().map(|s| OsStr::new(s).to_os_string()).collect()
}

/// Infer interpreter from script extension when no shebang is present
fn infer_interpreter(script: &Path) -> Result<&'static str> {
    let extension = script.extension().and_then(|e| e.to_str()).unwrap_or("");

    let interpreter = match extension {
        "" | "sh" => "sh",
        "bash" => "bash",
        "zsh" => "zsh",
        "py" => "python3",
        "rb" => "ruby",
        "pl" => "perl",
        "js" => "node",
        _ => {
            return Err(Error::Message(format!(
                "Cannot infer interpreter for script: {} (extension: {extension}). \
                 Add a shebang line or make it executable.",
                script.display()
            )));
        }
    };

    Ok(interpreter)
}
