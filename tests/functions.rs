use rusqlite::Connection;

fn setup_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    geopoly::functions::register(&conn).unwrap();
    conn
}

#[test]
fn json_round_trip_through_sql() {
    let conn = setup_connection();
    let rendered: String = conn
        .query_row(
            "SELECT geopoly_json(geopoly_blob('[[0,0],[1,0],[1,1],[0,1]]'))",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(rendered, "[[0,0],[1,0],[1,1],[0,1],[0,0]]");
}

#[test]
fn svg_carries_extra_attributes() {
    let conn = setup_connection();
    let svg: String = conn
        .query_row(
            "SELECT geopoly_svg('[[0,0],[1,0],[0,1],[0,0]]', 'stroke=''red''')",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert!(svg.contains("stroke='red'"));
}

#[test]
fn overlap_containment_via_sql() {
    let conn = setup_connection();
    let code: i64 = conn
        .query_row(
            "SELECT geopoly_overlap( \
                '[[0,0],[1,0],[1,1],[0,1]]', \
                '[[-1,-1],[2,-1],[2,2],[-1,2]]')",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(code, 2); // first polygon is entirely inside the second
}

#[test]
fn bbox_of_a_triangle_is_its_axis_aligned_rectangle() {
    let conn = setup_connection();
    let json: String = conn
        .query_row(
            "SELECT geopoly_json(geopoly_bbox('[[0,0],[4,0],[4,2],[1,3]]'))",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(json, "[[0,0],[4,0],[4,3],[0,3],[0,0]]");
}
