// One error type for the whole app.
// Every variant states *where* things went wrong.
// The paint core never produces errors: missing tracker data is just "nothing to do".

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed

    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the screen buffer failed

    #[error("Camera init error: {0}")]
    CameraInit(String), // Opening/starting the camera failed

    #[error("Camera frame error: {0}")]
    CameraFrame(String), // Grabbing/decoding/resizing a frame failed

    #[error("Tracker spawn error: {0}")]
    TrackerSpawn(#[source] std::io::Error), // The external tracker process could not start

    #[error("Config error: {0}")]
    Config(String), // Bad command-line flag or value
}
