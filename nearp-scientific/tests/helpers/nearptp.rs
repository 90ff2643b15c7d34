/// Service cost and required flag of nodes 1..=N.
pub type NodeRow = (i64, bool);
/// I, J, service cost, required flag and traversal cost.
pub type LinkRow = (usize, usize, i64, bool, i64);
/// I, J, K, cost and type.
pub type TurnRow = (usize, usize, usize, i64, &'static str);

#[derive(Default)]
pub struct NearpTpBuilder {
    vehicles: i64,
    nodes: Vec<NodeRow>,
    edges: Vec<LinkRow>,
    arcs: Vec<LinkRow>,
    turns: Vec<TurnRow>,
}

impl NearpTpBuilder {
    pub fn set_vehicles(&mut self, vehicles: i64) -> &mut Self {
        self.vehicles = vehicles;
        self
    }

    pub fn add_node(&mut self, node: NodeRow) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, edge: LinkRow) -> &mut Self {
        self.edges.push(edge);
        self
    }

    pub fn add_arc(&mut self, arc: LinkRow) -> &mut Self {
        self.arcs.push(arc);
        self
    }

    pub fn add_turn(&mut self, turn: TurnRow) -> &mut Self {
        self.turns.push(turn);
        self
    }

    pub fn build(&self) -> String {
        let mut data = String::new();

        data.push_str("Name:\tmy-tp-instance\n");
        data.push_str(&format!("#Vehicles:\t{}\n", self.vehicles));
        data.push_str("Capacity:\t100\n");
        data.push_str("Depot:\t1\n");
        data.push_str(&format!("#Nodes:\t{}\n", self.nodes.len()));
        data.push_str(&format!("#Edges:\t{}\n", self.edges.len()));
        data.push_str(&format!("#Arcs:\t{}\n", self.arcs.len()));
        data.push_str(&format!("#Nb-Turns:\t{}\n\n", self.turns.len()));

        data.push_str("----------NODES----------\nINDEX\tQTY\tIS-REQUIRED\tX\tY\n");
        self.nodes.iter().zip(1..).for_each(|((service, is_required), id)| {
            data.push_str(&format!("{id}\t{service}\t{}\t0\t0\n", u8::from(*is_required)));
        });

        data.push_str("\n----------EDGES----------\n");
        write_links(&mut data, &self.edges);
        data.push_str("\n-----------ARCS----------\n");
        write_links(&mut data, &self.arcs);

        data.push_str("\n----------TURNS----------\nINDEX-I\tINDEX-J\tINDEX-K\tCOST\tTYPE\n");
        self.turns.iter().for_each(|(from, via, to, cost, kind)| {
            data.push_str(&format!("{from}\t{via}\t{to}\t{cost}\t{kind}\n"));
        });

        data
    }
}

fn write_links(data: &mut String, links: &[LinkRow]) {
    data.push_str("INDEX-I\tINDEX-J\tQTY\tIS-REQUIRED\tTR-COST\n");
    links.iter().for_each(|(from, to, service, is_required, traversal)| {
        data.push_str(&format!("{from}\t{to}\t{service}\t{}\t{traversal}\n", u8::from(*is_required)));
    });
}
