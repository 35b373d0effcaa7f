//! Runs embedded `PostgreSQL` lifecycle steps on behalf of the test suite.
//!
//! ```text
//! pg_worker <setup|start|stop> <payload.json>
//! ```
//!
//! `PostgreSQL` refuses to run as root, so when the test runner is root the
//! `PostgreSQL` adapter tests delegate cluster setup to this binary. It drops
//! to the `nobody` account before touching the cluster. The payload is the
//! JSON `WorkerPayload` written by `pg-embed-setup-unpriv`.

#[cfg(unix)]
mod worker {
    use cap_std::ambient_authority;
    use cap_std::fs::Dir;
    use nix::unistd::{Uid, User, initgroups, setgid, setuid};
    use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
    use postgresql_embedded::{PostgreSQL, Status};
    use std::env;
    use std::ffi::{CString, OsString};
    use std::path::{Path, PathBuf};
    use thiserror::Error;

    const UNPRIVILEGED_USER: &str = "nobody";

    /// Failures reported by the worker.
    #[derive(Debug, Error)]
    pub enum WorkerError {
        #[error("usage: pg_worker <setup|start|stop> <payload.json>: {0}")]
        Usage(String),
        #[error("failed to read payload {path}: {source}")]
        PayloadRead {
            path: PathBuf,
            #[source]
            source: std::io::Error,
        },
        #[error("failed to decode payload: {0}")]
        PayloadDecode(#[from] serde_json::Error),
        #[error("invalid cluster settings: {0}")]
        Settings(String),
        #[error("failed to drop privileges: {0}")]
        Privileges(String),
        #[error("failed to build runtime: {0}")]
        Runtime(#[source] std::io::Error),
        #[error("postgres {step} failed: {message}")]
        Postgres { step: &'static str, message: String },
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Setup,
        Start,
        Stop,
    }

    impl Step {
        fn parse(value: &OsString) -> Result<Self, WorkerError> {
            match value.to_str() {
                Some("setup") => Ok(Self::Setup),
                Some("start") => Ok(Self::Start),
                Some("stop") => Ok(Self::Stop),
                _ => Err(WorkerError::Usage(format!("unknown step {value:?}"))),
            }
        }

        const fn name(self) -> &'static str {
            match self {
                Self::Setup => "setup",
                Self::Start => "start",
                Self::Stop => "stop",
            }
        }
    }

    pub fn run(mut args: impl Iterator<Item = OsString>) -> Result<(), WorkerError> {
        let _program = args.next();
        let step = args
            .next()
            .ok_or_else(|| WorkerError::Usage("missing step".to_owned()))
            .and_then(|arg| Step::parse(&arg))?;
        let payload_path = args
            .next()
            .map(PathBuf::from)
            .ok_or_else(|| WorkerError::Usage("missing payload path".to_owned()))?;
        if let Some(extra) = args.next() {
            return Err(WorkerError::Usage(format!("unexpected argument {extra:?}")));
        }

        let payload = read_payload(&payload_path)?;
        drop_privileges()?;
        let settings = payload
            .settings
            .into_settings()
            .map_err(|err| WorkerError::Settings(err.to_string()))?;
        apply_environment(&payload.environment);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(WorkerError::Runtime)?;
        let mut postgres = PostgreSQL::new(settings);
        runtime.block_on(async {
            match step {
                Step::Setup => {
                    postgres.setup().await.map_err(|err| failed(step, &err))?;
                    ensure_started(&mut postgres, step).await
                }
                Step::Start => {
                    ensure_started(&mut postgres, step).await?;
                    // The cluster must outlive this process.
                    std::mem::forget(postgres);
                    Ok(())
                }
                Step::Stop => postgres.stop().await.map_err(|err| failed(step, &err)),
            }
        })
    }

    async fn ensure_started(postgres: &mut PostgreSQL, step: Step) -> Result<(), WorkerError> {
        if matches!(postgres.status(), Status::Started) {
            return Ok(());
        }
        postgres.start().await.map_err(|err| failed(step, &err))
    }

    fn failed(step: Step, err: &impl std::fmt::Display) -> WorkerError {
        WorkerError::Postgres {
            step: step.name(),
            message: err.to_string(),
        }
    }

    fn read_payload(path: &Path) -> Result<WorkerPayload, WorkerError> {
        let read_error = |source: std::io::Error| WorkerError::PayloadRead {
            path: path.to_path_buf(),
            source,
        };
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            read_error(std::io::Error::other("payload path has no file name"))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let bytes = dir.read(file_name).map_err(read_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn drop_privileges() -> Result<(), WorkerError> {
        if !Uid::effective().is_root() {
            return Ok(());
        }

        let user = User::from_name(UNPRIVILEGED_USER)
            .map_err(|err| WorkerError::Privileges(err.to_string()))?
            .ok_or_else(|| {
                WorkerError::Privileges(format!("user {UNPRIVILEGED_USER} not found"))
            })?;
        let user_name = CString::new(user.name.clone())
            .map_err(|err| WorkerError::Privileges(err.to_string()))?;
        initgroups(&user_name, user.gid).map_err(|err| WorkerError::Privileges(err.to_string()))?;
        setgid(user.gid).map_err(|err| WorkerError::Privileges(err.to_string()))?;
        setuid(user.uid).map_err(|err| WorkerError::Privileges(err.to_string()))?;

        // SAFETY: no other threads exist yet; the runtime is built afterwards.
        unsafe {
            env::set_var("HOME", &user.dir);
            env::set_var("USER", &user.name);
            env::set_var("LOGNAME", &user.name);
        }
        Ok(())
    }

    fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
        for (key, value) in environment {
            // SAFETY: no other threads exist yet; the runtime is built afterwards.
            unsafe {
                match value {
                    Some(secret) => env::set_var(key, secret.expose()),
                    None => env::remove_var(key),
                }
            }
        }
    }
}

#[cfg(unix)]
fn main() -> Result<(), worker::WorkerError> {
    worker::run(std::env::args_os())
}

#[cfg(not(unix))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    Err("pg_worker requires a Unix platform".into())
}
