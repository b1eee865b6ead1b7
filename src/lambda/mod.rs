/*-------------------------------------------------------------------------------------------------
  Function-as-a-Service (AWS Lambda) Modules
-------------------------------------------------------------------------------------------------*/

mod handler;
mod runtime;

/*-------------------------------------------------------------------------------------------------
  Lambda Module Interface
-------------------------------------------------------------------------------------------------*/

pub use handler::{handle, handle_event, LambdaRequest};
pub use runtime::{Invocation, Runtime};
