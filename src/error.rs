// One error type for the whole app.
// Every variant states *where* things went wrong.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Window init error: {0}")]
    WindowInit(String), // Creating the window failed
    #[error("Window update error: {0}")]
    WindowUpdate(String), // Pushing the frame to the window failed
    #[error("Config error: {0}")]
    Config(String), // An environment variable held a value we can't use
    #[error("PNG encode error: {0}")]
    Encode(#[from] image::ImageError), // Compressing the painting failed
    #[error("File error: {0}")]
    Io(#[from] std::io::Error), // Creating/writing the output file failed
}
