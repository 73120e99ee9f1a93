fn main() {
    ion_trap_sim::app::run();
}
