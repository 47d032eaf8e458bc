//! 设置页测试


use parking_lot::Mutex;
use settings_abstractions::{ConfigSource, SettingsEvent, SettingsEventListener, ValidationError};
use std::any::Any;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
pub(crate) fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 记录各配置源调用顺序的日志
pub(crate) type Journal = Arc<Mutex<Vec<String>>>;

/// 测试用配置源
pub(crate) struct MockSource {
    pub id: String,
    pub label: String,
    pub modified: bool,
    pub fail_apply: bool,
    pub applied: bool,
    pub disposed: bool,
    pub journal: Journal,
}

impl MockSource {
    pub fn new(id: &str, journal: &Journal) -> Self {
        Self {
            id: id.to_string(),
            label: format!("{} label", id),
            modified: false,
            fail_apply: false,
            applied: false,
            disposed: false,
            journal: Arc::clone(journal),
        }
    }

    pub fn modified(mut self) -> Self {
        self.modified = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_apply = true;
        self
    }

    pub fn boxed(self) -> Box<dyn ConfigSource> {
        Box::new(self)
    }
}

impl ConfigSource for MockSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.fail_apply {
            Err(ValidationError::new(&self.id, "mock failure"))
        } else {
            Ok(())
        }
    }

    fn apply(&mut self) -> Result<(), ValidationError> {
        self.journal.lock().push(format!("apply:{}", self.id));
        self.validate()?;
        self.applied = true;
        self.modified = false;
        Ok(())
    }

    fn reset(&mut self) {
        self.journal.lock().push(format!("reset:{}", self.id));
        self.modified = false;
    }

    fn help_topic(&self) -> Option<&str> {
        Some("mock.help")
    }

    fn dispose(&mut self) {
        self.journal.lock().push(format!("dispose:{}", self.id));
        self.disposed = true;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// 收集事件的监听器
#[derive(Default)]
pub(crate) struct RecordingListener {
    pub events: Mutex<Vec<SettingsEvent>>,
}

impl SettingsEventListener for RecordingListener {
    fn on_settings_event(&self, event: &SettingsEvent) {
        self.events.lock().push(event.clone());
    }

    fn name(&self) -> &str {
        "recording"
    }
}
