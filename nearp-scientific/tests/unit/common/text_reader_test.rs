use super::*;

fn read_header_from(content: &str) -> GenericResult<InstanceHeader> {
    read_header(&mut BufReader::new(content.as_bytes()), &mut String::new())
}

fn read_record_from(content: &str) -> GenericResult<Record> {
    read_record(&mut BufReader::new(content.as_bytes()), &mut String::new(), "test")
}

#[test]
fn can_read_header_until_blank_line() {
    let content = "Name:\t\tgdb1\nOptimal value:\t-1\n#Vehicles:\t-1\nCapacity:\t500\nDepot Node:\t1\n#Nodes:\t\t12\n\
                   #Edges:\t\t22\n#Arcs:\t\t0\n#Required N:\t3\n#Required-E:\t22\n#Required A:\t0\n\n#Nodes: 99\n";

    let header = read_header_from(content).unwrap();

    assert_eq!(header.name, "gdb1");
    assert_eq!(header.fleet(), Ok(FleetSize::Unbounded));
    assert_eq!(header.capacity, Some(500));
    assert_eq!(header.depot, Some(1));
    assert_eq!((header.nodes, header.edges, header.arcs), (12, 22, 0));
    assert_eq!((header.required_nodes, header.required_edges, header.required_arcs), (3, 22, 0));
}

parameterized_test! {can_parse_fleet_size, (vehicles, expected), {
    can_parse_fleet_size_impl(vehicles, expected);
}}

can_parse_fleet_size! {
    case01_fixed: (Some(3), Ok(FleetSize::Fixed(3))),
    case02_empty: (Some(0), Ok(FleetSize::Fixed(0))),
    case03_unbounded: (Some(-1), Ok(FleetSize::Unbounded)),
    case04_negative: (Some(-2), Err("unexpected vehicle count: -2".into())),
    case05_missing: (None, Err("missing #Vehicles in header".into())),
}

fn can_parse_fleet_size_impl(vehicles: Option<i64>, expected: GenericResult<FleetSize>) {
    let header = InstanceHeader { vehicles, ..InstanceHeader::default() };

    assert_eq!(header.fleet(), expected);
}

#[test]
fn can_reject_invalid_header_values() {
    assert_eq!(
        read_header_from("Capacity: many\n").map(|_| ()),
        Err("cannot parse Capacity: 'invalid digit found in string'".into())
    );
    assert_eq!(read_header_from("#Nodes: -4\n").map(|_| ()), Err("#Nodes cannot be negative, got -4".into()));
}

#[test]
fn can_skip_section_titles_and_blank_lines() {
    let record = read_record_from("\n----------NODES----------\nINDEX\tQTY\tIS-REQUIRED\n  N12\t3\t1  \n").unwrap();

    assert_eq!(record.id(0, "id"), Ok(12));
    assert_eq!(record.int(1, "cost"), Ok(3));
    assert_eq!(record.flag(2, "flag"), Ok(true));
}

#[test]
fn can_report_end_of_input() {
    let result = read_record_from("ReN.\tDEMAND\tS. COST\n\n");

    assert_eq!(result.map(|_| ()), Err("unexpected end of input in test section".into()));
}

#[test]
fn can_report_malformed_record() {
    let record = read_record_from("1\tx\t2\n").unwrap();

    assert_eq!(record.int(1, "cost"), Err("cannot parse cost in line '1\tx\t2'".into()));
    assert_eq!(record.flag(2, "flag"), Err("cannot parse flag in line '1\tx\t2'".into()));
    assert_eq!(record.int(3, "demand"), Err("missing demand in line '1\tx\t2'".into()));
    assert_eq!(record.text_from(1), "x 2");
    assert_eq!(record.text_from(5), "");
}

#[test]
fn can_read_exact_amount_of_records() {
    let mut reader = BufReader::new("EDGE\n1\t2\n2\t3\n\nARC\n3\t1\n".as_bytes());
    let mut buffer = String::new();

    let edges = read_records(&mut reader, &mut buffer, "EDGE", 2, |record| record.id(1, "to")).unwrap();
    let arcs = read_records(&mut reader, &mut buffer, "ARC", 1, |record| record.id(1, "to")).unwrap();

    assert_eq!(edges, vec![2, 3]);
    assert_eq!(arcs, vec![1]);
}
