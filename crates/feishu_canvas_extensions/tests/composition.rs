//! Integration tests for how the Feishu extensions nest around a node type's
//! own hooks and around each other.
//!
//! A [`NativeBehavior`] extension registered first stands in for the node's
//! built-in hooks. The Feishu extensions registered after it must:
//! 1. **Paint** after the native paint
//! 2. **Construct** after the native construction hook
//! 3. **Execute** their checks before the native execution hooks, passing the
//!    message through unchanged
//! 4. **Size** on top of the native size


use std::sync::Arc;

use feishu_canvas_extensions::FeishuTableExtensions;
use feishu_canvas_extensions::config::ExtensionConfig;
use feishu_canvas_extensions::overlay::StatusOverlayExtension;
use feishu_canvas_extensions::retry::RETRY_EXTENSION;
use feishu_canvas_host::app::{App, AppError, AppHandle};
use feishu_canvas_host::canvas::DrawContext;
use feishu_canvas_host::extension::{Extension, ExtensionGroup};
use feishu_canvas_host::hooks::{DrawHook, HookError, HookResult};
use feishu_canvas_host::logger::{LogLevel, Logger};
use feishu_canvas_host::message::ExecutionMessage;
use feishu_canvas_host::node::{NodeId, NodeInstance, Size, Widget};
use feishu_canvas_host::node_type::{NodeData, NodeType};
use feishu_canvas_host::testing::{DrawOp, RecordingCanvas, RecordingLogger};
use parking_lot::Mutex;
use test_utils::{CallLog, NativeBehavior, TABLE_NODE, fill_credentials, table_node_data};

fn native_then_feishu(log: &CallLog, logger: &Arc<RecordingLogger>) -> App {
    let logger: Arc<dyn Logger> = logger.clone();
    let mut app = App::new().with_logger(logger);
    app.add_extensions(NativeBehavior::new(log))
        .unwrap()
        .add_extensions(FeishuTableExtensions::default().build())
        .unwrap();
    app.register_node_type(table_node_data()).unwrap();
    app
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAINT
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn paint_runs_native_then_overlay() {
    let log = CallLog::default();
    let app = native_then_feishu(&log, &Arc::new(RecordingLogger::new()));
    let mut node = app.create_node(TABLE_NODE, NodeId::new(1)).unwrap();
    node.set_value("status_info", "成功获取表格数据");

    let mut canvas = RecordingCanvas::new();
    app.node_type_of(&node)
        .unwrap()
        .draw_foreground(&node, &mut canvas)
        .unwrap();

    let texts: Vec<_> = canvas.texts().into_iter().map(|(text, _, _)| text).collect();
    assert_eq!(texts, vec!["body", "成功获取表格数据"]);
    assert_eq!(
        canvas.text_fill_styles(),
        vec![None, Some("#44ff44".to_owned())]
    );
    assert_eq!(canvas.open_saves(), 0);
}

#[test]
fn paint_without_status_draws_only_native() {
    let log = CallLog::default();
    let app = native_then_feishu(&log, &Arc::new(RecordingLogger::new()));
    let node = app.create_node(TABLE_NODE, NodeId::new(1)).unwrap();

    let mut canvas = RecordingCanvas::new();
    app.node_type_of(&node)
        .unwrap()
        .draw_foreground(&node, &mut canvas)
        .unwrap();

    assert_eq!(
        canvas.ops,
        vec![DrawOp::FillText {
            text: "body".to_owned(),
            x: 0.0,
            y: 0.0
        }]
    );
}

#[test]
fn failing_native_paint_propagates_and_skips_overlay() {
    let failing: DrawHook = Arc::new(|_node: &NodeInstance, _ctx: &mut dyn DrawContext| -> HookResult {
        Err(HookError::failed("draw_foreground", "lost context"))
    });
    let mut node_type = NodeType::new(TABLE_NODE);
    node_type.hooks.draw_foreground = Some(failing);
    StatusOverlayExtension::default().before_register_node_type(
        &mut node_type,
        &table_node_data(),
        &AppHandle::default(),
    );

    let mut node = NodeInstance::new(NodeId::new(1), TABLE_NODE);
    node.push_widget(Widget::text("status_info", "错误"));
    let mut canvas = RecordingCanvas::new();
    let error = node_type.draw_foreground(&node, &mut canvas).unwrap_err();

    assert_eq!(error.to_string(), "draw_foreground hook failed: lost context");
    assert!(canvas.ops.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONSTRUCTION AND SIZE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn construction_runs_native_first_and_appends_retry_last() {
    let log = CallLog::default();
    let app = native_then_feishu(&log, &Arc::new(RecordingLogger::new()));
    let node = app.create_node(TABLE_NODE, NodeId::new(4)).unwrap();

    assert_eq!(*log.lock(), vec!["native:created"]);
    assert_eq!(node.widgets.last().map(|widget| widget.name.as_str()), Some("retry"));
    assert_eq!(node.widgets.iter().filter(|widget| widget.name == "retry").count(), 1);
}

#[test]
fn size_reserves_on_top_of_native_size() {
    let log = CallLog::default();
    let app = native_then_feishu(&log, &Arc::new(RecordingLogger::new()));
    let node = app.create_node(TABLE_NODE, NodeId::new(4)).unwrap();

    // Native reports 180x120.
    assert_eq!(node.size, Size::new(250.0, 170.0));
    let node_type = app.node_type_of(&node).unwrap();
    assert_eq!(node_type.compute_size(&node).unwrap(), Size::new(250.0, 170.0));
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXECUTION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn empty_inputs_warn_and_still_delegate_unchanged_message() {
    let log = CallLog::default();
    let logger = Arc::new(RecordingLogger::new());
    let app = native_then_feishu(&log, &logger);
    let mut node = app.create_node(TABLE_NODE, NodeId::new(5)).unwrap();
    log.lock().clear();

    let message = ExecutionMessage::new().with_field("step", 1);
    app.node_type_of(&node)
        .unwrap()
        .executing(&mut node, &message)
        .unwrap();

    let warnings = logger.at_level(LogLevel::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("App ID"));
    assert!(warnings[0].message.contains("App Secret"));
    assert!(warnings[0].message.contains("table URL"));
    assert_eq!(*log.lock(), vec![format!("native:executing {message}")]);
}

#[test]
fn filled_inputs_do_not_warn() {
    let log = CallLog::default();
    let logger = Arc::new(RecordingLogger::new());
    let app = native_then_feishu(&log, &logger);
    let mut node = app.create_node(TABLE_NODE, NodeId::new(5)).unwrap();
    fill_credentials(&mut node);

    app.node_type_of(&node)
        .unwrap()
        .executing(&mut node, &ExecutionMessage::new())
        .unwrap();

    assert!(logger.at_level(LogLevel::Warn).is_empty());
}

#[test]
fn executed_reports_prompt_then_delegates() {
    let log = CallLog::default();
    let logger = Arc::new(RecordingLogger::new());
    let app = native_then_feishu(&log, &logger);
    let mut node = app.create_node(TABLE_NODE, NodeId::new(6)).unwrap();
    log.lock().clear();

    let message = ExecutionMessage::new().with_prompt("重点内容: 发布计划");
    app.node_type_of(&node)
        .unwrap()
        .executed(&mut node, &message)
        .unwrap();

    let infos = logger.at_level(LogLevel::Info);
    assert_eq!(infos.len(), 1);
    assert!(infos[0].message.contains("发布计划"));
    assert_eq!(*log.lock(), vec![format!("native:executed {message}")]);
}

// ═══════════════════════════════════════════════════════════════════════════════
// TARGETING AND REGISTRATION
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn other_node_types_are_untouched() {
    let mut app = App::new();
    app.add_extensions(FeishuTableExtensions::default().build()).unwrap();
    let node_type = app
        .register_node_type(NodeData::new("KSampler"))
        .unwrap();

    assert_eq!(node_type.hooks.installed_count(), 0);
}

#[test]
fn configured_target_is_decorated() {
    let mut app = App::new();
    app.add_extensions(
        FeishuTableExtensions::new(ExtensionConfig::default().with_node_type("FeishuWriteNode")).build(),
    )
    .unwrap();

    let write = app
        .register_node_type(NodeData::new("FeishuWriteNode"))
        .unwrap();
    assert_eq!(write.hooks.installed_count(), 5);
    let table = app.register_node_type(table_node_data()).unwrap();
    assert_eq!(table.hooks.installed_count(), 0);
}

#[test]
fn disabled_retry_adds_no_button() {
    let mut app = App::new();
    app.add_extensions(FeishuTableExtensions::default().build().disable(RETRY_EXTENSION))
        .unwrap();
    app.register_node_type(table_node_data()).unwrap();

    let node = app.create_node(TABLE_NODE, NodeId::new(1)).unwrap();
    assert!(node.widget("retry").is_none());
}

#[test]
fn registering_the_group_twice_fails() {
    let mut app = App::new();
    app.add_extensions(FeishuTableExtensions::default().build()).unwrap();

    let result = app.add_extensions(FeishuTableExtensions::default().build());
    assert!(matches!(result, Err(AppError::DuplicateExtension(_))));
}

#[test]
fn later_wrapper_sits_outside_overlay() {
    let paints = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&paints);
    let mut app = App::new();
    app.add_extensions(FeishuTableExtensions::default().build()).unwrap();
    let mut node_type = app.register_node_type(table_node_data()).unwrap().clone();

    node_type.hooks.wrap_draw_foreground(move |previous| {
        Arc::new(move |node: &NodeInstance, ctx: &mut dyn DrawContext| -> HookResult {
            if let Some(previous) = &previous {
                previous(node, ctx)?;
            }
            *counter.lock() += 1;
            Ok(())
        })
    });

    let mut node = app.create_node(TABLE_NODE, NodeId::new(1)).unwrap();
    node.set_value("status_info", "处理中");
    let mut canvas = RecordingCanvas::new();
    node_type.draw_foreground(&node, &mut canvas).unwrap();

    assert_eq!(*paints.lock(), 1);
    assert_eq!(canvas.texts().len(), 1);
    assert_eq!(canvas.text_fill_styles(), vec![Some("#666".to_owned())]);
}
