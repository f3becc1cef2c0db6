//! Backend commands queued from UI to backend worker.

use shared::protocol::SubmitRequest;

pub enum BackendCommand {
    Submit { request: SubmitRequest },
}
