use pretty_assertions::assert_eq;

#[test]
fn snapshot_host_database_and_ground() {
    let input = "\
Hosts
  Azure_VM1
    svc1
Databases
  db1
Connections
  svc1 -- db1
  /gnd/ -- svc1
";
    let output = infradot::render(input);
    let expected = r##"digraph G {
    fontname="Arial"
    node [shape=box, style=filled, fontname="Arial", fontcolor=black, fillcolor=palegreen]
    edge [dir=none]

    // Ground references
    { node [shape=parallelogram, fixedsize=true, height=0.3, fontcolor=white]
        { node [label="gnd", width=0.42, color="#364895", fillcolor="#364895"]
            xg_gnd_1
        }
    }
    // Databases
    { node [shape=cylinder, fillcolor="#CDE8F6"]
        db1 [label=<<br/>db1>]
    }
    // VPN nodes
    { node [shape=cds, fixedsize=true, width=0.9, height=0.7, fillcolor="#ddccff", color="#732375"]
    }
    // Clusters (groups of devices)
    // Hosts/Devices/Servers/HW offering services
    subgraph cluster_Host_Azure_VM1 {
        style=filled; color="lightblue"; label=<<b>Azure VM1</b>>
        svc1
    }
    // end of hosts

    // Nets (connections)
    { edge [color="#00000080", penwidth=2.0]
        svc1 -> db1
        xg_gnd_1 -> svc1 [color="#364895a0", penwidth=2.0]
    }
}
"##;
    assert_eq!(output, expected);
}

#[test]
fn snapshot_clusters_web_and_vpn() {
    let input = "\
Clusters
  Office
    Front_Desk
    pc1
  Internet
WebServices
  Portal
Connections
  pc1 --vpnA-- Portal
  Internet .. Front_Desk
";
    let output = infradot::render(input);
    let expected = r##"digraph G {
    fontname="Arial"
    node [shape=box, style=filled, fontname="Arial", fontcolor=black, fillcolor=palegreen]
    edge [dir=none]

    // Ground references
    { node [shape=parallelogram, fixedsize=true, height=0.3, fontcolor=white]
    }
    // Web visible services
    { node [fillcolor="#00ffcc"]
        Portal [label=<Portal<br/>(https)>]
    }
    // VPN nodes
    { node [shape=cds, fixedsize=true, width=0.9, height=0.7, fillcolor="#ddccff", color="#732375"]
        { node [label=<vpnA<br/>VPN>] xv_vpnA_1 }
    }
    // Clusters (groups of devices)
    subgraph cluster_Clus_Office {
        style=filled; color="lightgray"; label=<<b>Office</b>>; fontsize=18
        Front_Desk [label=<Front Desk>]
        pc1
    }
    // Empty clusters (nodes drawn like clusters)
    { node [fontsize=18, fillcolor=lightgray, color=lightgray]
        Internet [label=<<b>Internet</b><br/><br/> . >]
    }
    // Hosts/Devices/Servers/HW offering services

    // Nets (connections)
    { edge [color="#00000080", penwidth=2.0]
        pc1 -> xv_vpnA_1 [color="#bbaaddb0", penwidth=4.0]
        xv_vpnA_1 -> Portal [color="#bbaaddb0", penwidth=4.0]
        Internet -> Front_Desk [style=dashed]
    }
}
"##;
    assert_eq!(output, expected);
}
