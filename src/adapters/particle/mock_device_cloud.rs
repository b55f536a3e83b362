//! Mock Device Cloud for testing and local development.
//!
//! Stands in for the Particle cloud so handlers can run without hardware.
//!
//! # Features
//!
//! - Queued function results and variable values (consumed in order)
//! - A fallback door status once the queue is empty
//! - Error injection
//! - Call tracking for verification (the most recent `CALL_LOG_LIMIT` calls)
//!
//! # Example
//!
//! ```ignore
//! let cloud = MockDeviceCloud::new()
//!     .with_variable("open")
//!     .with_function_error(DeviceCloudError::Timeout { timeout_secs: 10 });
//!
//! assert_eq!(cloud.read_variable("doorStatus").await?, "open");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{DeviceCloud, DeviceCloudError, FunctionResponse};

/// Calls kept by the log; older ones are dropped so a long-running mock
/// backend stays bounded.
pub const CALL_LOG_LIMIT: usize = 256;

/// A call made against the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Function { name: String, arg: String },
    Variable { name: String },
}

/// Scripted device cloud.
#[derive(Debug, Clone)]
pub struct MockDeviceCloud {
    function_results: Arc<Mutex<VecDeque<Result<FunctionResponse, DeviceCloudError>>>>,
    variable_results: Arc<Mutex<VecDeque<Result<String, DeviceCloudError>>>>,
    /// Returned by `read_variable` when nothing is queued.
    door_status: Arc<Mutex<String>>,
    delay: Duration,
    calls: Arc<Mutex<VecDeque<MockCall>>>,
}

impl Default for MockDeviceCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDeviceCloud {
    /// Creates a mock reporting a closed door and accepting every press.
    pub fn new() -> Self {
        Self {
            function_results: Arc::new(Mutex::new(VecDeque::new())),
            variable_results: Arc::new(Mutex::new(VecDeque::new())),
            door_status: Arc::new(Mutex::new("closed".to_string())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queues a function return value.
    pub fn with_return_value(self, return_value: i32) -> Self {
        lock(&self.function_results).push_back(Ok(FunctionResponse::new(return_value)));
        self
    }

    /// Queues a function call failure.
    pub fn with_function_error(self, error: DeviceCloudError) -> Self {
        lock(&self.function_results).push_back(Err(error));
        self
    }

    /// Queues a variable value.
    pub fn with_variable(self, value: impl Into<String>) -> Self {
        lock(&self.variable_results).push_back(Ok(value.into()));
        self
    }

    /// Queues a variable read failure.
    pub fn with_variable_error(self, error: DeviceCloudError) -> Self {
        lock(&self.variable_results).push_back(Err(error));
        self
    }

    /// Sets the fallback door status.
    pub fn with_door_status(self, status: impl Into<String>) -> Self {
        self.set_door_status(status);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Changes the fallback door status on a shared mock.
    pub fn set_door_status(&self, status: impl Into<String>) {
        *lock(&self.door_status) = status.into();
    }

    /// Returns the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns the recorded calls, oldest first.
    pub fn get_calls(&self) -> Vec<MockCall> {
        lock(&self.calls).iter().cloned().collect()
    }

    fn record(&self, call: MockCall) {
        let mut calls = lock(&self.calls);
        if calls.len() == CALL_LOG_LIMIT {
            calls.pop_front();
        }
        calls.push_back(call);
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

/// Recovers the guard from a poisoned lock; the mock's state stays usable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl DeviceCloud for MockDeviceCloud {
    async fn call_function(
        &self,
        function: &str,
        arg: &str,
    ) -> Result<FunctionResponse, DeviceCloudError> {
        self.record(MockCall::Function {
            name: function.to_string(),
            arg: arg.to_string(),
        });
        self.simulate_latency().await;

        let next = lock(&self.function_results).pop_front();
        next.unwrap_or(Ok(FunctionResponse::new(1)))
    }

    async fn read_variable(&self, variable: &str) -> Result<String, DeviceCloudError> {
        self.record(MockCall::Variable {
            name: variable.to_string(),
        });
        self.simulate_latency().await;

        let next = lock(&self.variable_results).pop_front();
        match next {
            Some(result) => result,
            None => Ok(lock(&self.door_status).clone()),
        }
    }
}
