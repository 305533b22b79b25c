//! 生成器驱动

mod auto_wire;
mod bindings;
mod provisions;

pub use auto_wire::AutoWireCodeGenerator;
pub use bindings::BindingsCodeGenerator;
pub use provisions::ProvisionsCodeGenerator;

use codegen_abstractions::CodeGenerator;
use std::sync::Arc;

/// 全部内置生成器，按固定顺序：绑定、提供、自动注入
pub fn default_generators() -> Vec<Arc<dyn CodeGenerator>> {
    vec![
        Arc::new(BindingsCodeGenerator::new()),
        Arc::new(ProvisionsCodeGenerator::new()),
        Arc::new(AutoWireCodeGenerator::new()),
    ]
}
