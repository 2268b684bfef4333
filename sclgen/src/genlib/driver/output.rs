//! Writing rendered artifacts into the output directory.
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

use tracing::{event, Level};

use crate::emit::Artifact;
use crate::types::{GeneratorFailure, IoAction, IoFailed, IoTarget};

pub(crate) fn write_artifacts(
    output_dir: &Path,
    artifacts: &[Artifact],
) -> Result<(), GeneratorFailure> {
    create_dir_all(output_dir).map_err(|error| {
        GeneratorFailure::Io(IoFailed {
            action: IoAction::Create,
            target: IoTarget::Directory(output_dir.to_path_buf()),
            error,
        })
    })?;
    for artifact in artifacts {
        write_artifact(output_dir, artifact)?;
    }
    event!(
        Level::INFO,
        "wrote {} files to {}",
        artifacts.len(),
        output_dir.display()
    );
    Ok(())
}

fn write_artifact(output_dir: &Path, artifact: &Artifact) -> Result<(), GeneratorFailure> {
    let path = output_dir.join(&artifact.file_name);
    let mut inner = || -> Result<(), std::io::Error> {
        let mut file = File::create(&path)?;
        file.write_all(artifact.contents.as_bytes())?;
        file.flush()
    };
    match inner() {
        Err(error) => Err(GeneratorFailure::Io(IoFailed {
            action: IoAction::Write,
            target: IoTarget::File(path),
            error,
        })),
        Ok(()) => {
            event!(Level::DEBUG, "wrote {}", artifact.file_name);
            Ok(())
        }
    }
}
