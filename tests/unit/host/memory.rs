use super::*;

fn dom() -> MemoryDom {
    MemoryDom::new(Viewport::new(800.0, 600.0).unwrap())
}

#[test]
fn block_flow_stacks_siblings_with_padding_and_margins() {
    let mut d = dom();
    let root = d.root();
    let header = d
        .append_element(root, "header", BoxMetrics::content(100.0))
        .unwrap();
    let section = d
        .append_element(
            root,
            "section",
            BoxMetrics {
                content_height: 0.0,
                padding_top: 10.0,
                padding_bottom: 20.0,
                margin_top: 5.0,
                margin_bottom: 0.0,
            },
        )
        .unwrap();
    let a = d.append_element(section, "div", BoxMetrics::content(50.0)).unwrap();
    let b = d.append_element(section, "div", BoxMetrics::content(70.0)).unwrap();

    assert_eq!(d.bounding_rect(header).unwrap(), Rect::new(0.0, 0.0, 800.0, 100.0));
    assert_eq!(d.bounding_rect(section).unwrap().y0, 105.0);
    assert_eq!(d.bounding_rect(section).unwrap().height(), 150.0);
    assert_eq!(d.bounding_rect(a).unwrap().y0, 115.0);
    assert_eq!(d.bounding_rect(b).unwrap().y0, 165.0);
    assert_eq!(d.content_height(section).unwrap(), 120.0);
    assert_eq!(d.document_height(), 255.0);
}

#[test]
fn inline_styles_override_metrics() {
    let mut d = dom();
    let root = d.root();
    let s = d
        .append_element(
            root,
            "section",
            BoxMetrics {
                content_height: 10.0,
                padding_top: 30.0,
                padding_bottom: 30.0,
                margin_top: 40.0,
                margin_bottom: 40.0,
            },
        )
        .unwrap();
    d.set_style(s, "height", "400vh").unwrap();
    for prop in ["padding-top", "padding-bottom", "margin-top", "margin-bottom"] {
        d.set_style(s, prop, "0").unwrap();
    }
    let r = d.bounding_rect(s).unwrap();
    assert_eq!(r.y0, 0.0);
    assert_eq!(r.height(), 2400.0);
    d.remove_style(s, "height").unwrap();
    assert_eq!(d.bounding_rect(s).unwrap().height(), 10.0);
}

#[test]
fn scrolling_moves_rects_and_clamps() {
    let mut d = dom();
    let root = d.root();
    let s = d.append_element(root, "section", BoxMetrics::content(2000.0)).unwrap();
    assert_eq!(d.max_scroll(), 1400.0);
    assert_eq!(d.scroll_to(500.0), 500.0);
    assert_eq!(d.bounding_rect(s).unwrap().y0, -500.0);
    assert_eq!(d.scroll_to(9999.0), 1400.0);
    assert_eq!(d.scroll_to(-3.0), 0.0);

    d.scroll_to(1400.0);
    d.resize(Viewport::new(800.0, 1000.0).unwrap());
    assert_eq!(d.scroll_y(), 1000.0);

    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(d.scroll_to(bad), 1000.0);
    }
    assert_eq!(d.bounding_rect(s).unwrap().y0, -1000.0);
}

#[test]
fn query_returns_document_order() {
    let mut d = dom();
    let root = d.root();
    let outer = d.append_element(root, "section", BoxMetrics::default()).unwrap();
    d.add_class(outer, "s").unwrap();
    let inner = d.append_element(outer, "div", BoxMetrics::default()).unwrap();
    d.add_class(inner, "s").unwrap();
    let later = d.append_element(root, "section", BoxMetrics::default()).unwrap();
    d.add_class(later, "s").unwrap();
    d.set_id_attr(later, "last").unwrap();

    assert_eq!(d.query_selector_all(".s").unwrap(), vec![outer, inner, later]);
    assert_eq!(d.query_selector_all("section .s").unwrap(), vec![inner]);
    assert_eq!(d.query_selector_all("#last").unwrap(), vec![later]);
    assert!(d.query_selector_all(".missing").unwrap().is_empty());
    assert!(d.query_selector_all("a > b").is_err());
    assert_eq!(d.query_selector_all("body").unwrap(), vec![root]);
}

#[test]
fn append_moves_nodes_and_rejects_cycles() {
    let mut d = dom();
    let root = d.root();
    let a = d.append_element(root, "div", BoxMetrics::default()).unwrap();
    let b = d.append_element(root, "div", BoxMetrics::default()).unwrap();
    let wrapper = d.create_element("div").unwrap();
    assert_eq!(d.parent(wrapper).unwrap(), None);

    d.append_child(a, wrapper).unwrap();
    d.append_child(wrapper, b).unwrap();
    assert_eq!(d.children(root).unwrap(), vec![a]);
    assert_eq!(d.children(wrapper).unwrap(), vec![b]);
    assert!(d.append_child(b, a).is_err());
    assert!(d.remove_child(root, b).is_err());

    d.remove_child(wrapper, b).unwrap();
    assert_eq!(d.bounding_rect(b).unwrap(), Rect::ZERO);
    assert!(d.create_element("not a tag").is_err());
}

#[test]
fn removed_subtrees_stop_being_elements() {
    let mut d = dom();
    let root = d.root();
    let s = d.append_element(root, "section", BoxMetrics::default()).unwrap();
    let child = d.append_element(s, "div", BoxMetrics::default()).unwrap();
    d.remove_node(s).unwrap();
    assert!(!d.is_element(s));
    assert!(!d.is_element(child));
    assert!(d.children(s).is_err());
    assert!(d.remove_node(root).is_err());
}

#[test]
fn classes_are_a_set() {
    let mut d = dom();
    let root = d.root();
    let s = d.append_element(root, "div", BoxMetrics::default()).unwrap();
    d.add_class(s, "x").unwrap();
    d.add_class(s, "x").unwrap();
    assert_eq!(d.classes(s).unwrap(), ["x".to_string()]);
    assert!(d.has_class(s, "x").unwrap());
    d.remove_class(s, "x").unwrap();
    assert!(!d.has_class(s, "x").unwrap());
}

#[test]
fn listeners_and_frame_requests_are_tracked() {
    let mut d = dom();
    let a = d.add_listener(HostEvent::Scroll);
    let b = d.add_listener(HostEvent::Resize);
    assert_ne!(a, b);
    assert_eq!(d.listener_count(HostEvent::Scroll), 1);
    assert!(d.remove_listener(a));
    assert!(!d.remove_listener(a));
    assert_eq!(d.listener_count(HostEvent::Scroll), 0);

    d.request_animation_frame();
    d.request_animation_frame();
    assert_eq!(d.take_frame_requests(), 2);
    assert_eq!(d.take_frame_requests(), 0);
}

#[test]
fn lengths_parse_px_vh_and_unitless() {
    let vp = Viewport::new(800.0, 600.0).unwrap();
    assert_eq!(parse_length("0", vp), Some(0.0));
    assert_eq!(parse_length(" 12px ", vp), Some(12.0));
    assert_eq!(parse_length("50vh", vp), Some(300.0));
    assert_eq!(parse_length("auto", vp), None);
    assert_eq!(parse_length("NaNpx", vp), None);
}
