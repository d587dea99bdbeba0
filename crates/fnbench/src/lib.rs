/*!

# fnbench

fnbench emulates a serverless function on a long-lived process: the
function's resource is initialized once, then every RPC call picks the next
input, runs the function body on it, times it and replies with a one-line
report.

## fnbench Core

Selection, timing and formatting, independent of any transport.

```
use std::sync::Arc;
use fnbench::core::{Call, Executor, InputCatalog, Workload};

struct Len(InputCatalog);

impl Workload for Len {
    fn identity(&self) -> &str { "Len" }
    fn catalog(&self) -> &InputCatalog { &self.0 }
    fn invoke(&self, call: &Call<'_>) -> anyhow::Result<String> {
        Ok(call.input.len().to_string())
    }
}

let executor = Executor::new(Arc::new(Len(InputCatalog::new(["four", "three"])?)));
let invocation = executor.invoke(None)?;
assert_eq!(invocation.summary, "4");
# Ok::<(), Box<dyn std::error::Error>>(())
```

## fnbench Workloads

The concrete functions: image classification, image recognition with
`record`/`replay` tags, video transcoding and a synthetic sleep.

## fnbench Server

The RPC endpoint with reflection and the worker pool lifecycle.

```no_run
use fnbench::server::{Server, ServerConfig};
use fnbench::workloads::{WorkloadKind, WorkloadSpec};

let spec = WorkloadSpec::new(WorkloadKind::Recognize);
let server = Server::start(ServerConfig::default(), || spec.initialize())?;
let report = server.wait();
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

#![warn(rust_2018_idioms)]

pub use fnbench_core as core;
pub use fnbench_server as server;
pub use fnbench_workloads as workloads;
