/*!
The core of fnbench: everything that happens between an RPC call arriving
and a reply string leaving, without any knowledge of the transport.

A function is described by a [`Workload`]: an identity, a fixed
[`InputCatalog`] and one opaque computation. The [`Executor`] owns the
round-robin [`Selector`] for that catalog, times each computation and
keeps running latency statistics.

```
use std::sync::Arc;
use fnbench_core::{Call, Executor, InputCatalog, ReplyFormat, Workload};

struct Echo(InputCatalog);

impl Workload for Echo {
    fn identity(&self) -> &str {
        "Echo"
    }

    fn catalog(&self) -> &InputCatalog {
        &self.0
    }

    fn invoke(&self, call: &Call<'_>) -> anyhow::Result<String> {
        Ok(call.input.to_uppercase())
    }
}

let catalog = InputCatalog::new(["a.jpg", "b.jpg"])?;
let executor = Executor::new(Arc::new(Echo(catalog)));

let first = executor.invoke(None)?;
assert_eq!(first.input, "a.jpg");
assert_eq!(first.summary, "A.JPG");

let second = executor.invoke(None)?;
assert_eq!(second.input, "b.jpg");
assert!(executor.reply(&second).starts_with("fn: Echo | input: b.jpg"));
# Ok::<(), Box<dyn std::error::Error>>(())
```

## Cursor policy

The cursor is advanced when an input is *selected*, before the computation
runs. A failing computation therefore still consumes its slot in the
rotation, and the next call continues with the following input. Calls
resolved through a tag binding (see [`InputCatalog::with_tag`]) never touch
the cursor.
*/

#![warn(rust_2018_idioms)]

mod catalog;
mod error;
mod executor;
mod reply;
mod selector;
mod timing;
mod workload;

#[doc(inline)]
pub use crate::error::{ConfigError, InvocationError};
pub use catalog::InputCatalog;
pub use executor::{timed, ExecutionLimit, Executor, Invocation, Timed};
pub use reply::ReplyFormat;
pub use selector::{Selection, Selector};
pub use timing::{LatencyStats, ServeReport};
pub use workload::{Call, Workload};
