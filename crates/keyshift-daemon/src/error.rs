use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal daemon failures. None of these are retried.
#[derive(Error, Debug)]
pub enum DaemonError {
    #[error("Failed to create virtual keyboard (is /dev/uinput writable?)")]
    VirtualDevice(#[source] io::Error),

    #[error("Failed to open input device {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to grab input device {} for exclusive access. Is another application using it?", .path.display())]
    Grab {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read from input device")]
    Read(#[source] io::Error),

    #[error("Failed to write to virtual keyboard")]
    Inject(#[source] io::Error),
}
