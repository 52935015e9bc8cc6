use aerofoil_rs::codec;
use aerofoil_rs::config::DataLayout;
use aerofoil_rs::contour::generate::Naca4Digit;

fn main() {
    let naca = Naca4Digit::new(0.02, 0.4, 0.12, 1.0, 120).expect("NACA parameters out of domain");
    let contour = naca.contour("naca2412");

    let layout = DataLayout::new("data");
    layout.ensure().expect("Failed creating data directories");

    let coords = layout.coordinate_file("naca2412");
    let dat = layout.contour_file("naca2412");
    codec::write_coordinates(&contour, &coords).expect("Failed writing coordinate table");
    codec::write_dat(&contour, &dat).expect("Failed writing contour file");

    println!(
        "wrote {} points to {} and {}",
        contour.len(),
        coords.display(),
        dat.display()
    );
}
